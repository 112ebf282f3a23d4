//! Command-line configuration for the grid overlay tool.
//!
//! Flags are parsed into a raw [`CliConfig`] first; range recovery that
//! wants to log (the opacity reset) happens later in
//! [`CliConfig::resolve_style`], after the logger is up.

use crate::types::GridStyle;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_SPACING: u32 = 100;
pub const DEFAULT_COLOR: [u8; 3] = [0, 0, 255];
pub const DEFAULT_OPACITY: u8 = 128;
pub const DEFAULT_THICKNESS: u32 = 2;

/// Parsed command line. `opacity` is kept wide here so out-of-range values
/// survive parsing and can be reset with a warning instead of failing.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub input: PathBuf,
    pub spacing: u32,
    pub color: [u8; 3],
    pub opacity: i64,
    pub thickness: u32,
    pub output: Option<PathBuf>,
    pub layout_json: Option<PathBuf>,
    pub debug: bool,
}

impl CliConfig {
    /// Final grid style. Opacity outside [0, 255] is reset to the default
    /// with a warning; everything else passes through unchanged.
    pub fn resolve_style(&self) -> GridStyle {
        let opacity = if (0..=255).contains(&self.opacity) {
            self.opacity as u8
        } else {
            log::warn!(
                "Invalid opacity value: {}. Using default: {}",
                self.opacity,
                DEFAULT_OPACITY
            );
            DEFAULT_OPACITY
        };
        GridStyle {
            spacing: self.spacing,
            color: self.color,
            opacity,
            thickness: self.thickness,
        }
    }

    /// Explicit `--output`, or `<input_stem>_grid.png` in the current
    /// directory.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{stem}_grid.png"))
}

/// True if the command line asks for help. Checked before parsing so an
/// explicit help request prints usage on stdout and exits 0 instead of
/// going through the error path.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

pub fn parse_cli(
    program: &str,
    args: impl IntoIterator<Item = String>,
) -> Result<CliConfig, String> {
    let mut args = args.into_iter();
    let mut input: Option<PathBuf> = None;
    let mut spacing = DEFAULT_SPACING;
    let mut color = DEFAULT_COLOR;
    let mut opacity = DEFAULT_OPACITY as i64;
    let mut thickness = DEFAULT_THICKNESS;
    let mut output = None;
    let mut layout_json = None;
    let mut debug = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--spacing" => spacing = parse_value(&arg, args.next())?,
            "--color" => {
                for channel in color.iter_mut() {
                    *channel = parse_value(&arg, args.next())?;
                }
            }
            "--opacity" => opacity = parse_value(&arg, args.next())?,
            "--thickness" => thickness = parse_value(&arg, args.next())?,
            "--output" => output = Some(PathBuf::from(take_value(&arg, args.next())?)),
            "--layout-json" => layout_json = Some(PathBuf::from(take_value(&arg, args.next())?)),
            "--debug" => debug = true,
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {other}\n{}", usage(program)));
            }
            _ => {
                if input.is_some() {
                    return Err(format!("Unexpected extra argument: {arg}\n{}", usage(program)));
                }
                input = Some(PathBuf::from(arg));
            }
        }
    }

    let input = input.ok_or_else(|| usage(program))?;
    if spacing == 0 {
        return Err("--spacing must be a positive number of pixels".to_string());
    }
    if thickness == 0 {
        return Err("--thickness must be a positive number of pixels".to_string());
    }

    Ok(CliConfig {
        input,
        spacing,
        color,
        opacity,
        thickness,
        output,
        layout_json,
        debug,
    })
}

fn take_value(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("Missing value for {flag}"))
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = take_value(flag, value)?;
    raw.parse()
        .map_err(|e| format!("Invalid value {raw:?} for {flag}: {e}"))
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <input_image> [options]\n\
         \n\
         Options:\n\
         \x20 --spacing PIXELS      Grid line spacing in pixels (default: {DEFAULT_SPACING})\n\
         \x20 --color R G B         Grid line RGB color (default: 0 0 255)\n\
         \x20 --opacity VALUE       Grid line opacity, 0-255 (default: {DEFAULT_OPACITY})\n\
         \x20 --thickness PIXELS    Line thickness in pixels (default: {DEFAULT_THICKNESS})\n\
         \x20 --output FILENAME     Output filename (default: <input_stem>_grid.png)\n\
         \x20 --layout-json PATH    Also write the computed grid layout as JSON\n\
         \x20 --debug               Enable debug logging"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_apply_when_only_input_is_given() {
        let config = parse_cli("grid_overlay", args(&["photo.png"])).unwrap();
        assert_eq!(config.input, PathBuf::from("photo.png"));
        assert_eq!(config.spacing, 100);
        assert_eq!(config.color, [0, 0, 255]);
        assert_eq!(config.opacity, 128);
        assert_eq!(config.thickness, 2);
        assert!(config.output.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn default_output_uses_input_stem() {
        let config = parse_cli("grid_overlay", args(&["photo.png"])).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("photo_grid.png"));
        assert_eq!(
            default_output_path(Path::new("shots/frame.0013.jpeg")),
            PathBuf::from("frame.0013_grid.png")
        );
    }

    #[test]
    fn all_flags_parse() {
        let config = parse_cli(
            "grid_overlay",
            args(&[
                "in.png", "--spacing", "50", "--color", "255", "0", "0", "--opacity", "200",
                "--thickness", "3", "--output", "out.png", "--layout-json", "layout.json",
                "--debug",
            ]),
        )
        .unwrap();
        assert_eq!(config.spacing, 50);
        assert_eq!(config.color, [255, 0, 0]);
        assert_eq!(config.opacity, 200);
        assert_eq!(config.thickness, 3);
        assert_eq!(config.output, Some(PathBuf::from("out.png")));
        assert_eq!(config.layout_json, Some(PathBuf::from("layout.json")));
        assert!(config.debug);
    }

    #[test]
    fn out_of_range_opacity_resets_to_default() {
        let config =
            parse_cli("grid_overlay", args(&["in.png", "--opacity", "300"])).unwrap();
        assert_eq!(config.opacity, 300);
        assert_eq!(config.resolve_style().opacity, DEFAULT_OPACITY);

        let config =
            parse_cli("grid_overlay", args(&["in.png", "--opacity", "-5"])).unwrap();
        assert_eq!(config.resolve_style().opacity, DEFAULT_OPACITY);

        let config =
            parse_cli("grid_overlay", args(&["in.png", "--opacity", "255"])).unwrap();
        assert_eq!(config.resolve_style().opacity, 255);
    }

    #[test]
    fn zero_spacing_or_thickness_is_rejected() {
        assert!(parse_cli("p", args(&["in.png", "--spacing", "0"])).is_err());
        assert!(parse_cli("p", args(&["in.png", "--thickness", "0"])).is_err());
    }

    #[test]
    fn help_is_detected_before_parsing() {
        assert!(wants_help(&args(&["--help"])));
        assert!(wants_help(&args(&["in.png", "-h"])));
        assert!(!wants_help(&args(&["in.png", "--debug"])));
        assert!(usage("grid_overlay").starts_with("Usage: grid_overlay"));
    }

    #[test]
    fn malformed_values_and_unknown_flags_are_rejected() {
        assert!(parse_cli("p", args(&["in.png", "--spacing", "ten"])).is_err());
        assert!(parse_cli("p", args(&["in.png", "--color", "0", "0"])).is_err());
        assert!(parse_cli("p", args(&["in.png", "--color", "0", "0", "256"])).is_err());
        assert!(parse_cli("p", args(&["in.png", "--frobnicate"])).is_err());
        assert!(parse_cli("p", args(&[])).is_err());
    }
}
