//! Instruction-set simulator CLI.
//!
//! This binary provides a single entry point for the assembler toolchain. It performs:
//! 1. **Assemble:** Translate an assembly source file into machine code.
//! 2. **Disassemble:** Translate machine code back into assembly text.
//! 3. **Run:** Assemble (or load) a program and execute it to completion.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use microasm_core::config::Config;
use microasm_core::sim::Session;

#[derive(Parser, Debug)]
#[command(
    name = "microasm",
    author,
    version,
    about = "Two-way assembler and CPU simulator for small teaching architectures",
    long_about = "Assemble, disassemble, or run programs for the base, extended, or RS \
                  instruction sets.\n\nConfiguration is JSON (machine variant, numeric kind, \
                  memory size, origin). The CLI uses built-in defaults otherwise.\n\nExamples:\n  \
                  microasm asm program.s\n  microasm run program.s --max-cycles 5000\n  \
                  microasm disasm program.bin -c extended.json"
)]
struct Cli {
    /// JSON configuration file (defaults apply when omitted).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a source file into machine code.
    Asm {
        /// Assembly source file.
        file: PathBuf,

        /// Output path (defaults to the source path with a .bin extension).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Disassemble machine code into assembly text.
    Disasm {
        /// Machine-code file.
        file: PathBuf,

        /// Output path (prints to stdout when omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Assemble and execute a program, or execute a .bin directly.
    Run {
        /// Assembly source file, or machine code if it ends in .bin.
        file: PathBuf,

        /// Abort if the program has not halted after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Dump the register file after the program halts.
        #[arg(long)]
        registers: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Some(Commands::Asm { file, output }) => cmd_asm(config, &file, output),
        Some(Commands::Disasm { file, output }) => cmd_disasm(config, &file, output),
        Some(Commands::Run {
            file,
            max_cycles,
            registers,
        }) => cmd_run(config, &file, max_cycles, registers),
        None => {
            eprintln!("microasm — pass a subcommand");
            eprintln!();
            eprintln!("  microasm asm <source.s>            Assemble to machine code");
            eprintln!("  microasm disasm <program.bin>      Disassemble to text");
            eprintln!("  microasm run <source.s|bin>        Assemble and execute");
            eprintln!();
            eprintln!("  microasm --help  for full options");
            process::exit(1);
        }
    }
}

/// Loads the JSON configuration, or the defaults when no path is given.
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading config {}: {e}", path.display());
        process::exit(1);
    });
    Config::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing config {}: {e}", path.display());
        process::exit(1);
    })
}

fn read_source(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        process::exit(1);
    })
}

fn session(config: Config) -> Session {
    Session::new(config).unwrap_or_else(|e| {
        eprintln!("Error building machine: {e}");
        process::exit(1);
    })
}

/// Assembles a source file and writes the machine code next to it.
fn cmd_asm(config: Config, file: &Path, output: Option<PathBuf>) {
    let source = read_source(file);
    let mut session = session(config);
    if let Err(e) = session.assemble(&source) {
        eprintln!("{e}");
        process::exit(1);
    }
    let code = session.asm().machine_code();
    let out = output.unwrap_or_else(|| file.with_extension("bin"));
    if let Err(e) = fs::write(&out, &code) {
        eprintln!("Error writing {}: {e}", out.display());
        process::exit(1);
    }
    println!(
        "[*] Assembled {} word(s) ({} bytes) to {}",
        session.asm().words().len(),
        code.len(),
        out.display()
    );
}

/// Disassembles a machine-code file.
fn cmd_disasm(config: Config, file: &Path, output: Option<PathBuf>) {
    let bytes = fs::read(file).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", file.display());
        process::exit(1);
    });
    let session = session(config);
    let text = match session.asm().de_assemble(&bytes) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    match output {
        Some(out) => {
            if let Err(e) = fs::write(&out, text) {
                eprintln!("Error writing {}: {e}", out.display());
                process::exit(1);
            }
            println!("[*] Disassembled to {}", out.display());
        }
        None => println!("{text}"),
    }
}

/// Assembles (or loads) a program and runs it to completion.
fn cmd_run(config: Config, file: &Path, max_cycles: Option<u64>, registers: bool) {
    let cap = max_cycles.unwrap_or(microasm_core::config::defaults::CYCLE_CAP);
    let mut session = session(config);

    if file.extension().is_some_and(|ext| ext == "bin") {
        let bytes = fs::read(file).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", file.display());
            process::exit(1);
        });
        let origin = session.asm().origin();
        if let Err(e) = session.cpu_mut().mem.write_region(origin, &bytes) {
            eprintln!("Error loading program: {e}");
            process::exit(1);
        }
        session.cpu_mut().set_ip(origin);
    } else {
        let source = read_source(file);
        if let Err(e) = session.assemble_and_load(&source) {
            eprintln!("{e}");
            process::exit(1);
        }
    }

    match session.run_for(cap) {
        Ok(cycles) => println!("[*] Halted after {cycles} cycle(s)"),
        Err(e) => {
            eprintln!("\n[!] {e}");
            process::exit(1);
        }
    }

    if registers {
        dump_registers(&session);
    }
}

fn dump_registers(session: &Session) {
    use microasm_core::cpu::registers;
    println!();
    for (index, value) in session.cpu().regs.snapshot().iter().enumerate() {
        if let Some(name) = registers::name(index) {
            println!(
                "  {name:<3} {}",
                session.cpu().format_value(*value, 16)
            );
        }
    }
}
