use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use hummingbird::{
    ast::{ast::Stmt, statements::Lvalue},
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_system::type_system::TypeSystem,
};
use tracing_subscriber::EnvFilter;

/// Type-check a Hummingbird source file.
#[derive(Parser)]
#[command(name = "hummingbird", version, about = "The Hummingbird type checker")]
struct Args {
    /// Source file to check
    file: PathBuf,

    /// Print the resolved type of every top-level binding
    #[arg(long = "dump-types")]
    dump_types: bool,

    /// Do not print phase timings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", args.file.display(), error);
            return ExitCode::FAILURE;
        },
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            display_error(&error, &args.file, &source);
            return ExitCode::FAILURE;
        },
    };

    if !args.quiet {
        println!("Tokenized in {:?}", start.elapsed());
    }

    let parse_start = Instant::now();
    let ast = match parse(tokens, Rc::new(file_name)) {
        Ok(ast) => ast,
        Err(error) => {
            display_error(&error, &args.file, &source);
            return ExitCode::FAILURE;
        },
    };

    if !args.quiet {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    let type_check_start = Instant::now();
    let mut type_system = match TypeSystem::new() {
        Ok(type_system) => type_system,
        Err(error) => {
            eprintln!("Error: {} ({})", error.get_error_name(), error);
            return ExitCode::FAILURE;
        },
    };

    if let Err(error) = type_system.walk(&ast) {
        display_error(&error, &args.file, &source);
        return ExitCode::FAILURE;
    }

    if !args.quiet {
        println!("Type checked in {:?}", type_check_start.elapsed());
        println!("Total time: {:?}", start.elapsed());
    }

    if args.dump_types {
        for stmt in &ast.statements {
            let Stmt::Assignment(assignment) = stmt else { continue };
            let (Lvalue::Let { name, .. } | Lvalue::Var { name, .. }) = &assignment.lvalue else { continue };
            if let Some(ty) = assignment.ty.get() {
                println!("{}: {}", name, type_system.describe(ty));
            }
        }
    }

    ExitCode::SUCCESS
}
