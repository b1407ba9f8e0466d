//! Command-line parsing: `dutch3d [display] <latitude> <longitude>`.

use std::{fmt, num::ParseFloatError};

use clap::Parser;

use crate::systems::geospatial::coordinates::GeoCoordinate;

pub const USAGE: &str = "Usage: dutch3d [display] <latitude> <longitude>";

/// What the viewer was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum LaunchMode {
    /// Fewer than two values were given; the usage text should be shown.
    GlobeOnly,
    Marker(GeoCoordinate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchArgs {
    /// Leading `display` token, accepted and otherwise unused.
    pub display: Option<String>,
    pub mode: LaunchMode,
}

impl LaunchArgs {
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        match self.mode {
            LaunchMode::Marker(coordinate) => Some(coordinate),
            LaunchMode::GlobeOnly => None,
        }
    }
}

#[derive(Debug)]
pub enum ArgsError {
    /// Rejected by the argument parser itself, including `--help`.
    Cli(clap::Error),
    TooManyArguments { count: usize },
    InvalidNumber {
        name: &'static str,
        value: String,
        source: Option<ParseFloatError>,
    },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::Cli(e) => write!(f, "{e}"),
            ArgsError::TooManyArguments { count } => {
                write!(f, "expected at most 3 arguments, got {count}\n{USAGE}")
            }
            ArgsError::InvalidNumber {
                name,
                value,
                source: Some(e),
            } => write!(f, "invalid {name} '{value}': {e}"),
            ArgsError::InvalidNumber {
                name,
                value,
                source: None,
            } => write!(f, "invalid {name} '{value}': not a finite number"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::Cli(e) => Some(e),
            ArgsError::InvalidNumber { source: Some(e), .. } => Some(e),
            _ => None,
        }
    }
}

impl From<clap::Error> for ArgsError {
    fn from(e: clap::Error) -> Self {
        ArgsError::Cli(e)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "dutch3d",
    version,
    about = "Shows a globe with a marker at the given latitude and longitude",
    override_usage = "dutch3d [display] <latitude> <longitude>"
)]
struct CliArgs {
    /// [display] <latitude> <longitude>, in degrees.
    #[arg(value_name = "ARGS", allow_hyphen_values = true)]
    values: Vec<String>,
}

/// Parses `std::env::args()`.
pub fn parse() -> Result<LaunchArgs, ArgsError> {
    parse_from(std::env::args_os())
}

/// Parses an argument list whose first item is the program name.
pub fn parse_from<I, T>(args: I) -> Result<LaunchArgs, ArgsError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = CliArgs::try_parse_from(args)?;
    let mut values = cli.values;

    match values.len() {
        0 | 1 => Ok(LaunchArgs {
            display: None,
            mode: LaunchMode::GlobeOnly,
        }),
        // `display <number>`: only one numeric value follows the program name
        2 if !is_number(&values[0]) && is_number(&values[1]) => Ok(LaunchArgs {
            display: Some(values.swap_remove(0)),
            mode: LaunchMode::GlobeOnly,
        }),
        2 | 3 => {
            let longitude = parse_degrees("longitude", values.pop())?;
            let latitude = parse_degrees("latitude", values.pop())?;
            Ok(LaunchArgs {
                display: values.pop(),
                mode: LaunchMode::Marker(GeoCoordinate::new(latitude, longitude)),
            })
        }
        count => Err(ArgsError::TooManyArguments { count }),
    }
}

fn is_number(value: &str) -> bool {
    value.trim().parse::<f32>().is_ok()
}

fn parse_degrees(name: &'static str, value: Option<String>) -> Result<f32, ArgsError> {
    let value = value.unwrap_or_default();
    let degrees = value
        .trim()
        .parse::<f32>()
        .map_err(|e| ArgsError::InvalidNumber {
            name,
            value: value.clone(),
            source: Some(e),
        })?;

    if !degrees.is_finite() {
        return Err(ArgsError::InvalidNumber {
            name,
            value,
            source: None,
        });
    }

    Ok(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_values_are_latitude_then_longitude() {
        let args = parse_from(["dutch3d", "52", "5"]).unwrap();
        assert_eq!(args.display, None);
        assert_eq!(args.coordinate(), Some(GeoCoordinate::new(52.0, 5.0)));
    }

    #[test]
    fn leading_display_token_is_accepted() {
        let args = parse_from(["dutch3d", "display", "40.7", "-74.0"]).unwrap();
        assert_eq!(args.display.as_deref(), Some("display"));
        assert_eq!(args.coordinate(), Some(GeoCoordinate::new(40.7, -74.0)));
    }

    #[test]
    fn too_few_values_fall_back_to_globe_only() {
        assert_eq!(parse_from(["dutch3d"]).unwrap().mode, LaunchMode::GlobeOnly);
        assert_eq!(
            parse_from(["dutch3d", "52"]).unwrap().mode,
            LaunchMode::GlobeOnly
        );
    }

    #[test]
    fn too_many_values_are_rejected() {
        let err = parse_from(["dutch3d", "display", "1", "2", "3"]).unwrap_err();
        assert!(matches!(err, ArgsError::TooManyArguments { count: 4 }));
    }

    #[test]
    fn display_token_with_a_single_value_is_globe_only() {
        let args = parse_from(["dutch3d", "display", "52"]).unwrap();
        assert_eq!(args.mode, LaunchMode::GlobeOnly);
        assert_eq!(args.display.as_deref(), Some("display"));
    }

    #[test]
    fn negative_values_without_a_leading_zero() {
        let args = parse_from(["dutch3d", "-.5", "-1e3"]).unwrap();
        assert_eq!(args.coordinate(), Some(GeoCoordinate::new(-0.5, -1000.0)));
    }

    #[test]
    fn unparsable_value_names_the_argument() {
        let err = parse_from(["dutch3d", "display", "north", "5"]).unwrap_err();
        match err {
            ArgsError::InvalidNumber { name, value, source } => {
                assert_eq!(name, "latitude");
                assert_eq!(value, "north");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_value_is_rejected() {
        let err = parse_from(["dutch3d", "52", "inf"]).unwrap_err();
        assert!(matches!(
            parse_from(["dutch3d", "52", "east"]),
            Err(ArgsError::InvalidNumber {
                name: "longitude",
                ..
            })
        ));
        assert!(matches!(
            err,
            ArgsError::InvalidNumber {
                name: "longitude",
                source: None,
                ..
            }
        ));
        assert!(err.to_string().contains("not a finite number"));
    }
}
