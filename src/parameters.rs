use error_chain::bail;

use crate::errors::*;
use crate::grid_dimensions::GridDimensions;

/// Everything needed to generate a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeParameters {
    /// Extent of the grid along each axis.
    pub shape: Vec<usize>,
    /// Most boundary openings to carve.
    pub exits: usize,
    /// Most extra loop forming breaks on top of the spanning tree.
    pub internal_breaks: usize,
}

impl MazeParameters {
    pub fn new(shape: &[usize], exits: usize, internal_breaks: usize) -> Result<MazeParameters> {
        let parameters = MazeParameters {
            shape: shape.to_vec(),
            exits: exits,
            internal_breaks: internal_breaks,
        };
        let _ = parameters.dimensions()?;
        Ok(parameters)
    }

    /// Parse textual parameters, e.g. from a command line.
    ///
    /// The shape is a list of extents separated by `,` or `x` such as `"11,11"` or `"5x5x5"`.
    pub fn parse(shape: &str, exits: &str, internal_breaks: &str) -> Result<MazeParameters> {
        let extents = shape.split(|c| c == ',' || c == 'x')
            .map(|extent| parse_count("shape", extent))
            .collect::<Result<Vec<usize>>>()?;

        MazeParameters::new(&extents,
                            parse_count("exits", exits)?,
                            parse_count("internal_breaks", internal_breaks)?)
    }

    pub fn dimensions(&self) -> Result<GridDimensions> {
        GridDimensions::new(&self.shape)
    }
}

fn parse_count(name: &'static str, text: &str) -> Result<usize> {
    let trimmed = text.trim();
    match trimmed.parse::<i64>() {
        Ok(value) if value < 0 => {
            bail!(ErrorKind::InvalidParameter(name, format!("{} is negative", value)))
        }
        Ok(_) => {
            trimmed.parse::<usize>()
                .chain_err(|| ErrorKind::InvalidParameter(name, format!("{} is too large", trimmed)))
        }
        Err(_) => bail!(ErrorKind::InvalidParameter(name, format!("`{}` is not a whole number", trimmed))),
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn invalid_parameter_name(result: Result<MazeParameters>) -> &'static str {
        match *result.unwrap_err().kind() {
            ErrorKind::InvalidParameter(name, _) => name,
            ref other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn new_validates_shape() {
        let parameters = MazeParameters::new(&[5, 7], 2, 1).unwrap();
        assert_eq!(parameters.shape, vec![5, 7]);
        assert_eq!(parameters.dimensions().unwrap().shape(), &[5, 7]);

        assert_eq!(invalid_parameter_name(MazeParameters::new(&[], 0, 0)), "shape");
        assert_eq!(invalid_parameter_name(MazeParameters::new(&[5, 0], 0, 0)), "shape");
    }

    #[test]
    fn parse_accepts_both_separators() {
        let commas = MazeParameters::parse("5,5,3", "2", "0").unwrap();
        let crosses = MazeParameters::parse("5x5x3", " 2 ", "0").unwrap();
        assert_eq!(commas, crosses);
        assert_eq!(commas, MazeParameters { shape: vec![5, 5, 3], exits: 2, internal_breaks: 0 });
    }

    #[test]
    fn parse_names_the_offending_parameter() {
        assert_eq!(invalid_parameter_name(MazeParameters::parse("5,-5", "1", "1")), "shape");
        assert_eq!(invalid_parameter_name(MazeParameters::parse("5,0", "1", "1")), "shape");
        assert_eq!(invalid_parameter_name(MazeParameters::parse("5,,5", "1", "1")), "shape");
        assert_eq!(invalid_parameter_name(MazeParameters::parse("5,five", "1", "1")), "shape");
        assert_eq!(invalid_parameter_name(MazeParameters::parse("5,5", "-1", "1")), "exits");
        assert_eq!(invalid_parameter_name(MazeParameters::parse("5,5", "one", "1")), "exits");
        assert_eq!(invalid_parameter_name(MazeParameters::parse("5,5", "1", "-3")), "internal_breaks");
    }

    #[test]
    fn error_message_mentions_parameter() {
        let err = MazeParameters::parse("5,5", "-1", "0").unwrap_err();
        assert_eq!(err.to_string(), "invalid `exits`: -1 is negative");
    }
}
