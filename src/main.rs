// braintty: A resumable Brainfuck virtual machine with tape visualization

mod loader;
mod tape;
mod ui;
mod vm;

use std::fs;
use std::io;
use std::io::Write;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use loader::program::Program;
use tape::cells::DEFAULT_TAPE_CELLS;
use ui::App;
use vm::control::{Controller, DEFAULT_QUANTUM};
use vm::engine::{CycleOutcome, Engine};
use vm::observer::TickMonitor;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [options] <file.bf>", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --input <text>       Provide input bytes up front");
    eprintln!("      --input-file <path>  Read input bytes from a file");
    eprintln!(
        "      --tape-size <cells>  Preallocated tape cells (default {})",
        DEFAULT_TAPE_CELLS
    );
    eprintln!(
        "      --quantum <count>    Instructions per cycle (default {})",
        DEFAULT_QUANTUM
    );
    eprintln!("      --run                Run headlessly and print the output");
    eprintln!("  -h, --help               Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/hello.bf             # Watch the classic greeting run",
        program_name
    );
    eprintln!(
        "  {} demos/echo.bf -i hello     # Feed input up front",
        program_name
    );
    eprintln!(
        "  {} --run demos/hello.bf       # Headless run, output to stdout",
        program_name
    );
}

/// Read the value following a flag, or exit with usage.
fn flag_value<'a>(args: &'a [String], index: usize, flag: &str, program_name: &str) -> &'a str {
    match args.get(index) {
        Some(value) => value,
        None => {
            eprintln!("Error: {} requires a value", flag);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    }
}

/// Read the numeric value following a flag, or exit with usage.
fn flag_count(args: &[String], index: usize, flag: &str, program_name: &str) -> usize {
    let raw = flag_value(args, index, flag, program_name);
    match raw.parse::<usize>() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("Error: {} expects a number, got '{}'", flag, raw);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let program_name = args
        .get(0)
        .map(|s| s.as_str())
        .unwrap_or("braintty")
        .to_string();

    let mut source_path: Option<String> = None;
    let mut input_bytes: Vec<u8> = Vec::new();
    let mut tape_cells = DEFAULT_TAPE_CELLS;
    let mut quantum = DEFAULT_QUANTUM;
    let mut headless = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage(&program_name);
                return Ok(());
            }
            "--run" => headless = true,
            "--input" | "-i" => {
                i += 1;
                let text = flag_value(&args, i, "--input", &program_name);
                input_bytes.extend_from_slice(text.as_bytes());
            }
            "--input-file" => {
                i += 1;
                let path = flag_value(&args, i, "--input-file", &program_name);
                match fs::read(path) {
                    Ok(data) => input_bytes.extend_from_slice(&data),
                    Err(e) => {
                        eprintln!("Error: Cannot read input file '{}': {}", path, e);
                        std::process::exit(1);
                    }
                }
            }
            "--tape-size" => {
                i += 1;
                tape_cells = flag_count(&args, i, "--tape-size", &program_name);
            }
            "--quantum" => {
                i += 1;
                quantum = flag_count(&args, i, "--quantum", &program_name);
            }
            flag if flag.starts_with('-') => {
                eprintln!("Error: Unknown option '{}'", flag);
                eprintln!();
                print_usage(&program_name);
                std::process::exit(1);
            }
            path => {
                if source_path.is_some() {
                    eprintln!("Error: More than one program file given");
                    std::process::exit(1);
                }
                source_path = Some(path.to_string());
            }
        }
        i += 1;
    }

    let source_file = match source_path {
        Some(path) => path,
        None => {
            eprintln!("Error: No program file provided");
            eprintln!();
            print_usage(&program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(&source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        std::process::exit(1);
    }

    if quantum == 0 {
        eprintln!("Error: --quantum must be at least 1");
        std::process::exit(1);
    }

    // Read and load the program
    let source = fs::read_to_string(&source_file)?;

    let program = match Program::load(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Load error: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!("Loaded {} instructions.", program.len());

    let engine = Engine::new(program, input_bytes, tape_cells);
    let controller = Controller::new(engine);

    if headless {
        return run_headless(controller, quantum);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(controller, quantum);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Run the program to its end without a UI and print the output to stdout.
///
/// Exit status: 0 on completion, 2 when the input runs dry, 3 on a fault.
fn run_headless(
    mut controller: Controller,
    quantum: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut monitor = TickMonitor::new();
    let outcome = controller.run_to_completion(quantum, &mut monitor)?;

    let mut stdout = io::stdout();
    stdout.write_all(controller.engine().output().bytes())?;
    stdout.flush()?;

    match outcome {
        CycleOutcome::InputExhausted => {
            controller.stop(&mut monitor)?;
            eprintln!(
                "Input exhausted after {} instructions.",
                controller.engine().executed()
            );
            std::process::exit(2);
        }
        CycleOutcome::Aborted(fault) => {
            eprintln!("Aborted: {}", fault);
            std::process::exit(3);
        }
        _ => {}
    }

    let elapsed = monitor.elapsed().unwrap_or_default();
    eprintln!(
        "Executed {} instructions in {} cycles ({:.2}s).",
        controller.engine().executed(),
        monitor.cycles,
        elapsed.as_secs_f64()
    );

    Ok(())
}
