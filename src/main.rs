//! Juno CLI: compile and run source files on the bytecode VM.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI command to execute.
enum Command {
    /// Run a script file
    Run { file: String },
    /// Evaluate a string
    Eval { code: String },
}

/// CLI options parsed from arguments.
struct Options {
    command: Command,
    disassemble: bool,
}

fn print_usage() {
    eprintln!("Juno {} - bytecode compiler and virtual machine", VERSION);
    eprintln!();
    eprintln!("Usage: juno [options] <script.jn>");
    eprintln!("       juno [options] -e <code>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e <code>            Evaluate code and print the result register");
    eprintln!("  -d, --disassemble    Print the bytecode listing before executing");
    eprintln!("  --version            Show version");
    eprintln!("  --help, -h           Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  juno script.jn               Run a script file");
    eprintln!("  juno -d script.jn            Run with a disassembly listing");
    eprintln!("  juno -e \"print(2 + 3);\"      Evaluate a one-liner");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut disassemble = false;
    let mut eval_code: Option<String> = None;
    let mut file: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-d" | "--disassemble" => disassemble = true,
            "-e" => {
                i += 1;
                let code = args
                    .get(i)
                    .ok_or_else(|| "-e requires a code argument".to_string())?;
                eval_code = Some(code.clone());
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--version" => {
                println!("juno {}", VERSION);
                process::exit(0);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option '{}'", arg));
            }
            arg => {
                if file.is_some() {
                    return Err("only one script file may be given".to_string());
                }
                file = Some(arg.to_string());
            }
        }
        i += 1;
    }

    let command = match (eval_code, file) {
        (Some(code), None) => Command::Eval { code },
        (None, Some(file)) => Command::Run { file },
        (Some(_), Some(_)) => return Err("-e and a script file are mutually exclusive".to_string()),
        (None, None) => return Err("no script file given".to_string()),
    };

    Ok(Options {
        command,
        disassemble,
    })
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let result = match &options.command {
        Command::Run { file } => juno::run_file(std::path::Path::new(file), options.disassemble),
        Command::Eval { code } => {
            juno::run_with_options(code, options.disassemble).inspect(|value| {
                println!("{}", value);
            })
        }
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(1);
    }
}
