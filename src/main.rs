//! CLI entry point for colortool.

mod cli;

use clap::Parser;
use colortool::build_info::cli_version_text;
use colortool::config::{load_config, Config};
use colortool::error::SchemeError;
use colortool::logging;
use colortool::render::Renderer;
use colortool::scheme::SchemeParseOptions;
use colortool::schemes::catalog::list_schemes;
use colortool::schemes::{SchemeLocator, SchemeRegistry};
use colortool::targets::{apply_targets, build_targets, TargetSettings};
use crossterm::tty::IsTty;

fn main() {
    let args = cli::Args::parse();
    logging::init(args.verbose);
    let renderer = Renderer::new(std::io::stdout().is_tty());

    if args.version {
        println!("{}", cli_version_text());
        return;
    }

    if args.current {
        if let Err(e) = renderer.color_table() {
            renderer.error(&format!("failed to print the color table: {e}"));
            std::process::exit(1);
        }
        return;
    }

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            renderer.error(&e.to_string());
            std::process::exit(1);
        }
    };

    let registry = SchemeRegistry::with_builtin_parsers(SchemeLocator::from_current_exe());

    if args.location {
        match registry.locator().schemes_dir() {
            Some(dir) => println!("{}", dir.display()),
            None => {
                renderer.error("unable to determine the executable directory");
                std::process::exit(1);
            }
        }
        return;
    }

    if args.schemes {
        let entries = list_schemes(&registry);
        if entries.is_empty() {
            renderer.warn("no loadable schemes found; see --location");
        }
        if let Err(e) = renderer.scheme_listing(&entries) {
            renderer.error(&format!("failed to print schemes: {e}"));
            std::process::exit(1);
        }
        return;
    }

    let Some(name) = args.scheme.as_deref() else {
        renderer.error("no scheme given; run `colortool --help` for usage");
        std::process::exit(1);
    };

    let options = match parse_options(&args, &config) {
        Ok(options) => options,
        Err(e) => {
            renderer.error(&e.to_string());
            std::process::exit(1);
        }
    };

    let report_errors = args.errors || config.parse.report_errors;
    let scheme = match registry.resolve(name, &options, report_errors) {
        Ok(scheme) => scheme,
        Err(e) => {
            renderer.error(&e.to_string());
            if matches!(e, SchemeError::Malformed { .. }) && !report_errors {
                renderer.error("rerun with --errors for parser diagnostics");
            }
            std::process::exit(1);
        }
    };

    let kinds = args.target_selection().kinds();
    tracing::debug!(
        targets = ?kinds.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "applying scheme"
    );
    let settings = target_settings(&args, &config);
    let mut targets = build_targets(&kinds, &settings);
    let reports = apply_targets(&scheme, &mut targets, args.quiet || config.output.quiet);
    let mut failed = false;
    for report in &reports {
        if let Err(e) = &report.result {
            renderer.error(&format!("{}: {e}", report.target));
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }
}

/// Config indices, then `-k`/`-f`; `--hex-color` replaces both.
fn parse_options(args: &cli::Args, config: &Config) -> Result<SchemeParseOptions, SchemeError> {
    if let Some(hex) = &args.hex_color {
        return SchemeParseOptions::from_hex_str(hex);
    }
    let mut options =
        SchemeParseOptions::new(config.parse.background_index, config.parse.foreground_index)?;
    if let Some(index) = args.background {
        options = options.with_background_index(index)?;
    }
    if let Some(index) = args.foreground {
        options = options.with_foreground_index(index)?;
    }
    Ok(options)
}

/// Export flags override the config file; the defaults path comes from config only.
fn target_settings(args: &cli::Args, config: &Config) -> TargetSettings {
    TargetSettings {
        defaults_path: config.defaults.path.clone(),
        export_path: args.output.clone().or_else(|| config.export.path.clone()),
        export_format: args.format.map(Into::into).unwrap_or(config.export.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colortool::targets::ProfileFormat;
    use std::path::PathBuf;

    fn args(argv: &[&str]) -> cli::Args {
        cli::Args::parse_from(std::iter::once("colortool").chain(argv.iter().copied()))
    }

    #[test]
    fn flags_override_config_indices() {
        let mut config = Config::default();
        config.parse.background_index = 4;
        config.parse.foreground_index = 9;

        let options = parse_options(&args(&["x"]), &config).unwrap();
        assert_eq!((options.background_index(), options.foreground_index()), (4, 9));

        let options = parse_options(&args(&["-f", "2", "x"]), &config).unwrap();
        assert_eq!((options.background_index(), options.foreground_index()), (4, 2));

        let options = parse_options(&args(&["--hex-color", "1a", "x"]), &config).unwrap();
        assert_eq!((options.background_index(), options.foreground_index()), (1, 10));
    }

    #[test]
    fn out_of_range_flag_is_invalid_option() {
        let err = parse_options(&args(&["-k", "16", "x"]), &Config::default()).unwrap_err();
        assert!(matches!(err, SchemeError::InvalidOption(_)));
        let err = parse_options(&args(&["--hex-color", "zz", "x"]), &Config::default()).unwrap_err();
        assert!(matches!(err, SchemeError::InvalidOption(_)));
    }

    #[test]
    fn export_flags_override_config() {
        let mut config = Config::default();
        config.defaults.path = Some(PathBuf::from("/d.toml"));
        config.export.path = Some(PathBuf::from("/from-config.json"));

        let settings = target_settings(&args(&["-t", "x"]), &config);
        assert_eq!(settings.export_path, Some(PathBuf::from("/from-config.json")));
        assert_eq!(settings.export_format, ProfileFormat::WindowsTerminal);

        let settings = target_settings(&args(&["-t", "-o", "/cli.ini", "--format", "ini", "x"]), &config);
        assert_eq!(settings.export_path, Some(PathBuf::from("/cli.ini")));
        assert_eq!(settings.export_format, ProfileFormat::Ini);
    }

    #[test]
    fn missing_defaults_path_keeps_every_selected_target() {
        let both = args(&["--both", "x"]);
        let kinds = both.target_selection().kinds();
        let settings = target_settings(&both, &Config::default());
        assert_eq!(settings.defaults_path, None);

        let targets = build_targets(&kinds, &settings);
        let names: Vec<_> = targets.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["console defaults", "current session"]);
    }
}
