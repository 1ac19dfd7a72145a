use color_print::ceprintln;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use tokasm::{assemble, resolve, write_program, write_symbols, Error, Program, TokenReader};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Token stream file [default: stdin]
    input: Option<String>,

    /// Resolved program output [default: stdout]
    #[clap(short, long)]
    output: Option<String>,

    /// Label table output [default: stderr]
    #[clap(short, long)]
    symbols: Option<String>,

    /// Print pass progress to stderr
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    if let Err(err) = run(&args) {
        err.print_diag(args.input.as_deref().unwrap_or("<stdin>"));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    if args.verbose {
        ceprintln!("<bold>1. Read Tokens</>");
        ceprintln!("  << {}", args.input.as_deref().unwrap_or("<stdin>"));
    }
    let program = read(args.input.as_deref())?;
    if args.verbose {
        ceprintln!(
            "  {} instructions, {} labels",
            program.instructions.len(),
            program.labels.len()
        );
    }

    emit_to(args.symbols.as_deref(), io::stderr(), "<stderr>", |out| {
        write_symbols(out, &program.labels)
    })?;

    if args.verbose {
        ceprintln!("<bold>2. Resolve Operands</>");
    }
    let resolved = resolve(&program)?;

    if args.verbose {
        ceprintln!("  > {}", args.output.as_deref().unwrap_or("<stdout>"));
    }
    emit_to(args.output.as_deref(), io::stdout(), "<stdout>", |out| {
        write_program(out, &resolved).map(|_| ())
    })
}

fn read(input: Option<&str>) -> Result<Program, Error> {
    match input {
        Some(path) => {
            let file = File::open(path).map_err(|err| Error::FileOpen(path.to_string(), err))?;
            assemble(TokenReader::new(BufReader::new(file)).named(path))
        }
        None => assemble(TokenReader::new(io::stdin().lock())),
    }
}

// Write to `path` if given, otherwise to the standard stream
fn emit_to<S, F>(path: Option<&str>, stream: S, name: &str, write: F) -> Result<(), Error>
where
    S: Write,
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|err| Error::FileCreate(path.to_string(), err))?;
            let mut out = BufWriter::new(file);
            write(&mut out)
                .and_then(|_| out.flush())
                .map_err(|err| Error::FileWrite(path.to_string(), err))
        }
        None => {
            let mut out = stream;
            write(&mut out)
                .and_then(|_| out.flush())
                .map_err(|err| Error::FileWrite(name.to_string(), err))
        }
    }
}
