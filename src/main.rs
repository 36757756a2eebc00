use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use matshell::Interpreter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate a single expression and exit
  Eval {
    /// The expression to evaluate
    expression: String,
  },
  /// Start an interactive session
  Repl,
}

fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Commands::Eval { expression } => {
      let mut calc = Interpreter::new();
      match calc.eval(&expression) {
        Ok(result) => println!("{result}"),
        Err(e) => {
          eprintln!("Error: {e}");
          std::process::exit(1);
        }
      }
    }
    Commands::Repl => repl()?,
  }
  Ok(())
}

fn repl() -> anyhow::Result<()> {
  let stdin = std::io::stdin();
  let mut stdout = std::io::stdout();
  let mut calc = Interpreter::new();

  loop {
    print!("> ");
    stdout.flush()?;

    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
      break;
    }
    let line = line.trim();
    if line.is_empty() {
      continue;
    }
    if line == "exit" || line == "quit" {
      break;
    }
    if line == "who" {
      let mut names: Vec<_> = calc.env().bindings().collect();
      names.sort_by_key(|(name, _)| name.to_string());
      for (name, value) in names {
        println!("{}", value.type_line(name));
      }
      continue;
    }

    let started = Instant::now();
    match calc.eval(line) {
      Ok(result) => println!("{result}"),
      Err(e) => println!("Error: {e}"),
    }
    let elapsed = started.elapsed();
    if elapsed > Duration::from_secs(1) {
      println!("Time elapsed: {elapsed:.2?}");
    }
  }
  Ok(())
}
