//! Gridlink - move and transform cell ranges between linked worksheets

mod config;
mod error;
mod logging;

use anyhow::Context;
use error::{CliError, Result};
use gridlink_core::{
    CallStack, CommandRegistry, Config, ErrorKind, Instruction, Interpreter, LogNotifier, Workbook,
    storage::write_grd_content,
};
use std::env;
use std::io::Write;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: gridlink [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --sheet <ID=FILE>         Load a worksheet (.grd); a missing file starts empty");
    eprintln!("  -l, --link <SRC> <TGT>        Link worksheet SRC to worksheet TGT");
    eprintln!("  -x, --exec <SRC> <TGT> <CMD>  Queue an instruction, e.g. -x 'a!A1:B2' 'b!C1' 'copy()'");
    eprintln!("  -w, --write                   Save worksheets back to their files");
    eprintln!("  -c, --config <FILE>           Load settings from TOML file");
    eprintln!("  -h, --help                    Print help");
    eprintln!();
    eprintln!("Without --write the worksheets are printed to stdout.");
    eprintln!("Set {} to a tracing filter for more output.", logging::LOG_ENV);
}

/// A worksheet named on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SheetArg {
    id: String,
    path: PathBuf,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
    sheets: Vec<SheetArg>,
    links: Vec<(String, String)>,
    instructions: Vec<Instruction>,
    write: bool,
    config_file: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                options.help = true;
                return Ok(options);
            }
            "-s" | "--sheet" => {
                let [spec] = take(args, &mut i, "--sheet", "ID=FILE")?;
                let Some((id, path)) = spec.split_once('=').filter(|(id, _)| !id.is_empty())
                else {
                    return Err(CliError::BadSheetSpec(spec.to_string()));
                };
                options.sheets.push(SheetArg {
                    id: id.to_string(),
                    path: PathBuf::from(path),
                });
            }
            "-l" | "--link" => {
                let [source, target] = take(args, &mut i, "--link", "a source and a target")?;
                options.links.push((source.to_string(), target.to_string()));
            }
            "-x" | "--exec" => {
                let [source, target, command] =
                    take(args, &mut i, "--exec", "a source, a target and a command")?;
                options
                    .instructions
                    .push(Instruction::new(source, target, command));
            }
            "-w" | "--write" => options.write = true,
            "-c" | "--config" => {
                let [path] = take(args, &mut i, "--config", "a file path")?;
                options.config_file = Some(PathBuf::from(path));
            }
            arg if arg.starts_with('-') => return Err(CliError::UnknownOption(arg.to_string())),
            arg => return Err(CliError::UnexpectedArgument(arg.to_string())),
        }
        i += 1;
    }

    Ok(options)
}

/// Consume the `N` values following the option at `args[*i]`.
fn take<'a, const N: usize>(
    args: &'a [String],
    i: &mut usize,
    option: &'static str,
    what: &'static str,
) -> Result<[&'a str; N]> {
    let values = args
        .get(*i + 1..*i + 1 + N)
        .ok_or(CliError::MissingValue { option, what })?;
    *i += N;
    Ok(std::array::from_fn(|k| values[k].as_str()))
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args[1..]) {
        Ok(options) if options.help => {
            print_usage();
            return;
        }
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let (config, warnings) = config::load_config(options.config_file.as_ref());
    logging::init(&config.log.level);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Err(e) = run(&options, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(options: &Options, config: Config) -> anyhow::Result<()> {
    let mut workbook = Workbook::new(config);
    for sheet in &options.sheets {
        if sheet.path.exists() {
            workbook
                .load_worksheet(&sheet.id, &sheet.path)
                .with_context(|| format!("Failed to load {}", sheet.path.display()))?;
        } else {
            workbook.add_worksheet(sheet.id.as_str(), "")?;
        }
    }
    workbook.restore_links();

    let notifier = LogNotifier;
    for (source, target) in &options.links {
        match workbook.link(source, target, &notifier) {
            Ok(()) => {}
            // Already linked: the notifier has said so.
            Err(err) if err.kind() == ErrorKind::DuplicateLink => {}
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to link {} to {}", source, target));
            }
        }
    }

    let registry = CommandRegistry::with_builtins();
    let interpreter = Interpreter::new(&registry, &notifier);
    let stack: CallStack = options.instructions.iter().cloned().collect();
    let executed = stack.run_all(&interpreter, &mut workbook)?;
    tracing::info!(executed, "instructions executed");

    if options.write {
        for sheet in &options.sheets {
            workbook
                .save_worksheet(&sheet.id, &sheet.path)
                .with_context(|| format!("Failed to save {}", sheet.path.display()))?;
        }
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    for sheet in &options.sheets {
        if let Some(file) = workbook.sheet_file(&sheet.id) {
            writeln!(stdout, "# {}", sheet.id)?;
            stdout.write_all(write_grd_content(&file).as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_full_command_line() {
        let options = parse_args(&args(&[
            "-s", "a=a.grd", "--sheet", "b=out/b.grd", "-l", "a", "b", "-x", "a!A1", "b!A1",
            "copy()", "-w",
        ]))
        .unwrap();

        assert_eq!(
            options.sheets,
            vec![
                SheetArg {
                    id: "a".into(),
                    path: "a.grd".into()
                },
                SheetArg {
                    id: "b".into(),
                    path: "out/b.grd".into()
                },
            ]
        );
        assert_eq!(options.links, vec![("a".to_string(), "b".to_string())]);
        assert_eq!(
            options.instructions,
            vec![Instruction::new("a!A1", "b!A1", "copy()")]
        );
        assert!(options.write);
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(
            parse_args(&args(&["-x", "a!A1", "b!A1"])).unwrap_err(),
            CliError::MissingValue {
                option: "--exec",
                what: "a source, a target and a command"
            }
        );
        assert!(parse_args(&args(&["-c"])).is_err());
    }

    #[test]
    fn test_bad_arguments() {
        assert_eq!(
            parse_args(&args(&["-s", "a.grd"])).unwrap_err(),
            CliError::BadSheetSpec("a.grd".into())
        );
        assert_eq!(
            parse_args(&args(&["-s", "=a.grd"])).unwrap_err(),
            CliError::BadSheetSpec("=a.grd".into())
        );
        assert_eq!(
            parse_args(&args(&["--frobnicate"])).unwrap_err(),
            CliError::UnknownOption("--frobnicate".into())
        );
        assert_eq!(
            parse_args(&args(&["stray"])).unwrap_err(),
            CliError::UnexpectedArgument("stray".into())
        );
    }

    #[test]
    fn test_help_stops_parsing() {
        assert!(parse_args(&args(&["-h", "--bogus"])).unwrap().help);
    }
}
