//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use colortool::build_info::HELP_BUILD_METADATA;
use colortool::targets::{ProfileFormat, TargetSelection};

/// Apply color schemes to the terminal, console defaults, or a profile file.
#[derive(Debug, Parser)]
#[command(name = "colortool", after_help = HELP_BUILD_METADATA, disable_version_flag = true)]
pub struct Args {
    /// Scheme name or path; the extension (.ini, .json, .itermcolors, .plt) is optional.
    pub scheme: Option<String>,

    /// Report why candidate scheme files failed to parse.
    #[arg(short = 'e', long = "errors")]
    pub errors: bool,

    /// Don't print confirmation messages.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Apply the scheme to the console defaults only.
    #[arg(short = 'd', long = "defaults")]
    pub defaults: bool,

    /// Apply the scheme to the console defaults and the current session.
    #[arg(short = 'b', long = "both", conflicts_with = "defaults")]
    pub both: bool,

    /// Emit xterm escape sequences to stdout instead of touching the session.
    #[arg(short = 'x', long = "xterm", conflicts_with = "terminal")]
    pub xterm: bool,

    /// Export a terminal profile instead of touching the session.
    #[arg(short = 't', long = "terminal")]
    pub terminal: bool,

    /// Table index of the default foreground color.
    #[arg(short = 'f', long = "foreground", value_name = "INDEX")]
    pub foreground: Option<usize>,

    /// Table index of the default background color.
    #[arg(short = 'k', long = "background", value_name = "INDEX")]
    pub background: Option<usize>,

    /// Packed attribute byte: high nibble background, low nibble foreground (e.g. 1a).
    #[arg(long = "hex-color", value_name = "HEX", conflicts_with_all = ["foreground", "background"])]
    pub hex_color: Option<String>,

    /// Print the current 16-color table as foreground/background samples.
    #[arg(short = 'c', long = "current")]
    pub current: bool,

    /// Print the directory searched for bundled schemes.
    #[arg(short = 'l', long = "location")]
    pub location: bool,

    /// List bundled schemes with color swatches.
    #[arg(short = 's', long = "schemes")]
    pub schemes: bool,

    /// File to write the exported profile to (with --terminal); stdout when omitted.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Profile export format (with --terminal).
    #[arg(long = "format", value_enum)]
    pub format: Option<ExportFormatArg>,

    /// Path to config file (default: ./colortool.toml or ~/.config/colortool/colortool.toml).
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Log scheme lookup and target decisions to stderr.
    #[arg(long = "verbose")]
    pub verbose: bool,

    /// Print version and build metadata.
    #[arg(short = 'V', long = "version")]
    pub version: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    /// Windows Terminal scheme JSON.
    Wt,
    /// INI scheme file.
    Ini,
}

impl From<ExportFormatArg> for ProfileFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Wt => ProfileFormat::WindowsTerminal,
            ExportFormatArg::Ini => ProfileFormat::Ini,
        }
    }
}

impl Args {
    /// Target switches as a selection; `--defaults` alone turns the session off.
    pub fn target_selection(&self) -> TargetSelection {
        TargetSelection {
            defaults: self.defaults || self.both,
            properties: !self.defaults,
            xterm: self.xterm,
            terminal: self.terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colortool::targets::TargetKind;

    #[test]
    fn bare_scheme_targets_current_session() {
        let args = Args::parse_from(["colortool", "campbell"]);
        assert_eq!(args.scheme.as_deref(), Some("campbell"));
        assert_eq!(args.target_selection().kinds(), vec![TargetKind::Current]);
    }

    #[test]
    fn defaults_and_both_select_expected_targets() {
        let args = Args::parse_from(["colortool", "-d", "campbell"]);
        assert_eq!(args.target_selection().kinds(), vec![TargetKind::Defaults]);

        let args = Args::parse_from(["colortool", "--both", "campbell"]);
        assert_eq!(
            args.target_selection().kinds(),
            vec![TargetKind::Defaults, TargetKind::Current]
        );

        assert!(Args::try_parse_from(["colortool", "-d", "-b", "campbell"]).is_err());
    }

    #[test]
    fn xterm_and_terminal_conflict() {
        let args = Args::parse_from(["colortool", "-x", "campbell"]);
        assert_eq!(args.target_selection().kinds(), vec![TargetKind::Escape]);
        assert!(Args::try_parse_from(["colortool", "-x", "-t", "campbell"]).is_err());
    }

    #[test]
    fn terminal_export_options_parse() {
        let args = Args::parse_from([
            "colortool", "-t", "--format", "ini", "-o", "out.ini", "campbell",
        ]);
        assert_eq!(args.format, Some(ExportFormatArg::Ini));
        assert_eq!(args.output, Some(PathBuf::from("out.ini")));
        assert_eq!(args.target_selection().kinds(), vec![TargetKind::Profile]);
        assert_eq!(ProfileFormat::from(ExportFormatArg::Wt), ProfileFormat::WindowsTerminal);
    }

    #[test]
    fn hex_color_conflicts_with_explicit_indices() {
        let args = Args::parse_from(["colortool", "--hex-color", "1a", "campbell"]);
        assert_eq!(args.hex_color.as_deref(), Some("1a"));
        assert!(Args::try_parse_from(["colortool", "--hex-color", "1a", "-f", "3", "x"]).is_err());
    }

    #[test]
    fn listing_flags_need_no_scheme() {
        let args = Args::parse_from(["colortool", "--schemes"]);
        assert!(args.schemes);
        assert!(args.scheme.is_none());
        let args = Args::parse_from(["colortool", "-l", "-V"]);
        assert!(args.location && args.version);
    }

    #[test]
    fn short_c_prints_current_table_and_config_is_long_only() {
        let args = Args::parse_from(["colortool", "-c"]);
        assert!(args.current);
        assert!(args.config.is_none());

        let args = Args::parse_from(["colortool", "--config", "ct.toml", "campbell"]);
        assert_eq!(args.config.as_deref(), Some("ct.toml"));
        assert!(!args.current);
    }
}
