/// mettacore - MeTTa interpreter CLI
use mettacore::backend::*;
use mettacore::config::InterpreterConfig;
use mettacore::repl::{format_results, run_repl};
use mettacore::sexpr::*;
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use tracing::Level;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    eprintln!("mettacore v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    mettacore [OPTIONS] <INPUT>");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help             Print this help message");
    eprintln!("    -v, --version          Print version information");
    eprintln!("    -o, --output <FILE>    Write output to FILE (default: stdout)");
    eprintln!("    --sexpr                Print parsed atoms instead of evaluating");
    eprintln!("    --repl                 Start interactive REPL");
    eprintln!("    --stdlib               Load the prelude before running");
    eprintln!("    --max-steps <N>        Rule applications per reduction (default: 1000)");
    eprintln!("    --config <FILE>        Read interpreter settings from a TOML file");
    eprintln!("    --log-level <LEVEL>    trace, debug, info, warn or error (default: warn)");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("    <INPUT>                Input MeTTa file (use '-' for stdin)");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    mettacore input.metta");
    eprintln!("    mettacore --repl --stdlib");
    eprintln!("    mettacore --sexpr input.metta");
    eprintln!("    cat input.metta | mettacore -");
}

fn print_version() {
    println!("mettacore {}", VERSION);
}

struct Options {
    input: Option<String>,
    output: Option<String>,
    show_sexpr: bool,
    repl_mode: bool,
    load_stdlib: bool,
    max_steps: Option<usize>,
    config: Option<String>,
    log_level: Level,
}

fn next_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("Missing value after {}", flag))
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut options = Options {
        input: None,
        output: None,
        show_sexpr: false,
        repl_mode: false,
        load_stdlib: false,
        max_steps: None,
        config: None,
        log_level: Level::WARN,
    };
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(0);
            }
            "-o" | "--output" => {
                options.output = Some(next_value(&args, &mut i, "-o")?);
            }
            "--sexpr" => {
                options.show_sexpr = true;
            }
            "--repl" => {
                options.repl_mode = true;
            }
            "--stdlib" => {
                options.load_stdlib = true;
            }
            "--max-steps" => {
                let value = next_value(&args, &mut i, "--max-steps")?;
                let steps = value
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid step count: {}", value))?;
                options.max_steps = Some(steps);
            }
            "--config" => {
                options.config = Some(next_value(&args, &mut i, "--config")?);
            }
            "--log-level" => {
                let value = next_value(&args, &mut i, "--log-level")?;
                options.log_level = value
                    .parse::<Level>()
                    .map_err(|_| format!("Invalid log level: {}", value))?;
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if options.input.is_some() {
                    return Err("Multiple input files specified".to_string());
                }
                options.input = Some(arg.to_string());
            }
        }
        i += 1;
    }

    Ok(options)
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn build_config(options: &Options) -> Result<InterpreterConfig, String> {
    let mut config = match &options.config {
        Some(path) => InterpreterConfig::load_from_path(Path::new(path))
            .map_err(|e| format!("{} ({})", e, path))?,
        None => InterpreterConfig::default(),
    };
    if let Some(steps) = options.max_steps {
        config.max_steps = steps;
    }
    if options.load_stdlib {
        config.load_stdlib = true;
    }
    Ok(config)
}

/// Program text from a file, or from stdin when `input` is `-`
fn read_input(input: &str) -> Result<String, String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        return Ok(source);
    }
    fs::read_to_string(input).map_err(|e| format!("Failed to read '{}': {}", input, e))
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), String> {
    match output {
        Some(path) => fs::write(path, content)
            .map_err(|e| format!("Failed to write output file '{}': {}", path, e)),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| format!("Failed to write to stdout: {}", e))
        }
    }
}

fn eval_metta(input: &str, options: &Options, config: InterpreterConfig) -> Result<String, String> {
    if options.show_sexpr {
        let tokens = Lexer::new(input).tokenize().map_err(|e| e.to_string())?;
        let sexprs = Parser::new(tokens).parse().map_err(|e| e.to_string())?;
        return Ok(sexprs.iter().map(|sexpr| format!("{}\n", sexpr)).collect());
    }

    let atoms = parse(input).map_err(|e| e.to_string())?;
    let mut interpreter = Interpreter::with_config(config);

    let mut output = String::new();
    for atom in &atoms {
        let results = interpreter.interpret(atom);
        // Bare symbols and literals are evaluated for effect only
        if matches!(atom, Atom::Expression(_)) && !results.is_empty() {
            output.push_str(&format_results(&results));
            output.push('\n');
        }
    }
    Ok(output)
}

fn main() {
    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    init_logging(options.log_level);

    let config = match build_config(&options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if options.repl_mode {
        let mut interpreter = Interpreter::with_config(config);
        if let Err(e) = run_repl(&mut interpreter) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    let input = match options.input.as_deref() {
        Some(input) => input,
        None => {
            eprintln!("Error: Missing input file");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let input_content = match read_input(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let output = match eval_metta(&input_content, &options, config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_output(options.output.as_deref(), &output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
