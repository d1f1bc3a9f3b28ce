//! CLI entry point for the counter stimulus harness.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use counter_core::{ControlLatency, CoreConfig, TraceEvent, TraceSink};
use counter_harness::runner::run_script_traced;
use counter_harness::script::load_script;
#[cfg(test)]
use tempfile as _;
use thiserror as _;

const USAGE_TEXT: &str = "\
Usage: counter-harness <command> [options]

Commands:
  run   <script> [--trace] [--registered-control]  Run a stimulus script
  check <script>                                    Parse a script without running it

Options:
  -t, --trace               Print every edge to stderr
  -r, --registered-control  Apply control inputs one edge after they are sampled
  -h, --help                Show this help message

Examples:
  counter-harness run vectors/tt_counter.cnt
  counter-harness run vectors/tt_counter.cnt --trace
  counter-harness check vectors/tt_counter.cnt
";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(RunArgs),
    Check(CheckArgs),
}

#[derive(Debug, PartialEq, Eq)]
struct RunArgs {
    input: PathBuf,
    trace: bool,
    registered_control: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct CheckArgs {
    input: PathBuf,
}

#[derive(Debug)]
enum ParseResult {
    Command(Command),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let first = args.next().ok_or_else(|| "missing command".to_string())?;

    if first == "--help" || first == "-h" {
        return Ok(ParseResult::Help);
    }

    let command_str = first.to_string_lossy().to_string();

    match command_str.as_str() {
        "run" => parse_run_args(args)
            .map(Command::Run)
            .map(ParseResult::Command),
        "check" => parse_check_args(args)
            .map(Command::Check)
            .map(ParseResult::Command),
        other => Err(format!("unknown command: {other}")),
    }
}

fn parse_run_args(args: impl Iterator<Item = OsString>) -> Result<RunArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut trace = false;
    let mut registered_control = false;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg == "--trace" || arg == "-t" {
            trace = true;
            continue;
        }

        if arg == "--registered-control" || arg == "-r" {
            registered_control = true;
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    let input = input.ok_or_else(|| "missing input path".to_string())?;
    Ok(RunArgs {
        input,
        trace,
        registered_control,
    })
}

fn parse_check_args(args: impl Iterator<Item = OsString>) -> Result<CheckArgs, String> {
    let mut input: Option<PathBuf> = None;

    for arg in args {
        if arg == "--help" || arg == "-h" {
            return Err(USAGE_TEXT.to_string());
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if input.is_some() {
            return Err("multiple input paths provided".to_string());
        }
        input = Some(PathBuf::from(arg));
    }

    let input = input.ok_or_else(|| "missing input path".to_string())?;
    Ok(CheckArgs { input })
}

const fn core_config(args: &RunArgs) -> CoreConfig {
    CoreConfig {
        control_latency: if args.registered_control {
            ControlLatency::Registered
        } else {
            ControlLatency::SameEdge
        },
        tracing_enabled: args.trace,
    }
}

/// Prints trace events to stderr, one line per event.
struct StderrTrace;

impl TraceSink for StderrTrace {
    fn on_event(&mut self, event: TraceEvent) {
        eprintln!("{}", format_trace_event(&event));
    }
}

fn format_trace_event(event: &TraceEvent) -> String {
    match event {
        TraceEvent::EdgeSampled { edge, inputs } => format!(
            "[{edge:>6}] sample rst={} ctrl={:#06b} data={:#04X}",
            u8::from(inputs.reset_active),
            inputs.control.to_bits(),
            inputs.data
        ),
        TraceEvent::EdgeCommitted {
            edge,
            before,
            after,
            outcome,
        } => format!(
            "[{edge:>6}] commit {before:#04X} -> {after:#04X} ({outcome:?}){}",
            if outcome.wrapped() { " wrap" } else { "" }
        ),
        TraceEvent::OutputDriven { edge, oe, value } => {
            format!("[{edge:>6}] output oe={} uo_out={value:#04X}", u8::from(*oe))
        }
    }
}

fn run(args: &RunArgs) -> Result<(), i32> {
    let script = match load_script(&args.input) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("error: {e}");
            return Err(1);
        }
    };

    let report = run_script_traced(&script, core_config(args), &mut StderrTrace);

    for failure in report.failures() {
        println!("{failure}");
    }

    let summary = report.summary();
    println!();
    println!(
        "Summary: {summary} (total: {}, edges: {})",
        summary.total, report.edges
    );

    if report.all_passed() {
        Ok(())
    } else {
        Err(1)
    }
}

fn check(args: &CheckArgs) -> Result<(), i32> {
    match load_script(&args.input) {
        Ok(script) => {
            println!(
                "{}: {} statements, {} expectations",
                args.input.display(),
                script.lines.len(),
                script.expectation_count()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {e}");
            Err(1)
        }
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Command(Command::Run(args))) => match run(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Ok(ParseResult::Command(Command::Check(args))) => match check(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            if error.starts_with("Usage:") {
                println!("{error}");
            } else {
                eprintln!("error: {error}");
                eprintln!("{USAGE_TEXT}");
            }
            1
        }
    };

    std::process::exit(exit_code);
}
