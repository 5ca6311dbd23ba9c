use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "sixelv")]
#[command(about = "Show PNG images on sixel-capable terminals")]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Color mode: 2, mono, 8, 16, 256, 256rgbi, gray, graymean, x68k
    #[arg(short = 'c', long, visible_short_alias = 'p', visible_alias = "colors")]
    pub color: Option<String>,

    /// Black and white, same as --color mono
    #[arg(short = 'e', long)]
    pub monochrome: bool,

    /// Grayscale with this many tones (2..=256)
    #[arg(long)]
    pub gray: Option<u16>,

    /// X68k palette, OR mode, no color registers
    #[arg(long)]
    pub x68k: bool,

    /// Custom palette as comma-separated hex RGB (e.g. "#000000,#ffffff,#ff0000")
    #[arg(long, value_delimiter = ',')]
    pub palette: Vec<String>,

    /// Nearest-color search: default (rgb) or hsv
    #[arg(long)]
    pub finder: Option<String>,

    /// Scale the emitted palette by this factor
    #[arg(long)]
    pub color_factor: Option<f32>,

    /// Output width in pixels
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Output height in pixels
    #[arg(short, long)]
    pub height: Option<usize>,

    /// both, width, height, long, short, or a scaledown- variant (sdboth, sdw, ...)
    #[arg(long, visible_alias = "axis")]
    pub resize_axis: Option<String>,

    /// Reduce method: none, fast, high, or a diffusion name (selects high)
    #[arg(short = 'd', long)]
    pub method: Option<String>,

    /// HighQuality kernel: fs, atkinson, jajuni, stucki, burkes, 2, 3, rgb
    #[arg(long)]
    pub diffusion: Option<String>,

    #[arg(short = 'O', long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Output file, - for stdout (single input only)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Encode bit planes for an OR-combining terminal
    #[arg(long)]
    pub ormode: bool,

    /// Omit the color register definitions
    #[arg(long)]
    pub suppress_palette: bool,

    /// Output gain, 256 = unity, up to 512
    #[arg(long)]
    pub gain: Option<u16>,

    /// Noise amplitude added before quantizing
    #[arg(long, visible_alias = "addnoise")]
    pub noise: Option<u16>,

    /// Noise generator seed
    #[arg(long)]
    pub seed: Option<u32>,

    /// Log failing files and continue with the next one
    #[arg(short, long, visible_alias = "noerr")]
    pub ignore_error: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// YAML file with default settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    help: Option<bool>,

    /// PNG files, - for stdin
    #[arg(required = true)]
    pub files: Vec<String>,
}

impl Cli {
    /// Overlay the flags given on the command line onto `config`.
    pub fn apply(&self, config: &mut Config) {
        // an explicit color choice replaces a palette from the config file
        if let Some(color) = &self.color {
            config.color = color.clone();
            config.gray = None;
            config.palette.clear();
        }
        if self.monochrome {
            config.color = "mono".to_string();
            config.gray = None;
            config.palette.clear();
        }
        if self.gray.is_some() {
            config.gray = self.gray;
            config.palette.clear();
        }
        if self.x68k {
            config.color = "x68k".to_string();
            config.gray = None;
            config.palette.clear();
            config.ormode = true;
            config.suppress_palette = true;
        }
        if !self.palette.is_empty() {
            config.palette = self.palette.clone();
        }
        if let Some(finder) = &self.finder {
            config.finder = finder.clone();
        }
        if self.color_factor.is_some() {
            config.color_factor = self.color_factor;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(axis) = &self.resize_axis {
            config.resize_axis = axis.clone();
        }
        if let Some(method) = &self.method {
            config.reduce = method.clone();
        }
        if let Some(diffusion) = &self.diffusion {
            config.diffusion = diffusion.clone();
        }
        if let Some(format) = self.output_format {
            config.output_format = format;
        }
        if self.ormode {
            config.ormode = true;
        }
        if self.suppress_palette {
            config.suppress_palette = true;
        }
        if let Some(gain) = self.gain {
            config.gain = gain;
        }
        if let Some(noise) = self.noise {
            config.noise = noise;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sixel_reductor::ColorMode;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sixelv").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_files_required() {
        assert!(Cli::try_parse_from(["sixelv"]).is_err());
    }

    #[test]
    fn test_short_h_is_height() {
        let cli = parse(&["-w", "80", "-h", "40", "a.png"]);
        assert_eq!(cli.width, Some(80));
        assert_eq!(cli.height, Some(40));
        assert_eq!(cli.files, vec!["a.png"]);
    }

    #[test]
    fn test_color_aliases() {
        assert_eq!(parse(&["-c", "16", "a.png"]).color.as_deref(), Some("16"));
        assert_eq!(parse(&["-p", "8", "a.png"]).color.as_deref(), Some("8"));
        assert_eq!(parse(&["--colors", "mono", "a.png"]).color.as_deref(), Some("mono"));
    }

    #[test]
    fn test_palette_list() {
        let cli = parse(&["--palette", "#000,#fff,#f00", "a.png"]);
        assert_eq!(cli.palette, vec!["#000", "#fff", "#f00"]);
    }

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let mut config = Config::from_yaml("color: \"16\"\nwidth: 80\ngain: 300\n").unwrap();
        parse(&["-h", "20", "--ormode", "a.png"]).apply(&mut config);
        assert_eq!(config.color, "16", "unset flag keeps file value");
        assert_eq!(config.width, 80);
        assert_eq!(config.height, 20);
        assert_eq!(config.gain, 300);
        assert!(config.ormode);
    }

    #[test]
    fn test_color_flag_clears_file_gray() {
        let mut config = Config::from_yaml("gray: 4").unwrap();
        parse(&["-c", "8", "a.png"]).apply(&mut config);
        assert_eq!(config.color_mode().unwrap(), ColorMode::Fixed8);
    }

    #[test]
    fn test_color_flags_replace_file_palette() {
        let yaml = "palette: [\"#000\", \"#fff\"]";
        for (args, expected) in [
            (&["-c", "16", "a.png"][..], ColorMode::FixedAnsi16),
            (&["-e", "a.png"][..], ColorMode::Mono),
            (&["--gray", "4", "a.png"][..], ColorMode::Gray(3)),
            (&["--x68k", "a.png"][..], ColorMode::FixedX68k),
        ] {
            let mut config = Config::from_yaml(yaml).unwrap();
            assert_eq!(config.color_mode().unwrap(), ColorMode::Custom);
            parse(args).apply(&mut config);
            assert_eq!(config.color_mode().unwrap(), expected, "{args:?}");
        }
    }

    #[test]
    fn test_file_palette_kept_without_color_flags() {
        let mut config = Config::from_yaml("palette: [\"#000\", \"#fff\"]").unwrap();
        parse(&["-w", "10", "a.png"]).apply(&mut config);
        assert_eq!(config.color_mode().unwrap(), ColorMode::Custom);
    }

    #[test]
    fn test_x68k_preset() {
        let mut config = Config::default();
        parse(&["--x68k", "a.png"]).apply(&mut config);
        assert_eq!(config.color_mode().unwrap(), ColorMode::FixedX68k);
        assert!(config.ormode);
        assert!(config.suppress_palette);
    }

    #[test]
    fn test_output_format_flag() {
        let mut config = Config::default();
        parse(&["-O", "bmp", "a.png"]).apply(&mut config);
        assert_eq!(config.output_format, OutputFormat::Bmp);
        assert!(Cli::try_parse_from(["sixelv", "-O", "gif", "a.png"]).is_err());
    }

    #[test]
    fn test_method_diffusion_shorthand() {
        let mut config = Config::default();
        parse(&["-d", "stucki", "a.png"]).apply(&mut config);
        assert_eq!(config.reduce, "stucki");
        assert!(config.converter().is_ok());
    }
}
