//! Interactive SQL console.
//!
//! One statement per line. Lines starting with `:` are console commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `:prev` / `:next` | Step through history and show the entry |
//! | `:run` | Re-run the history entry last shown |
//! | `:history` | List every statement run this session |
//! | `:canned <name>` | Run a canned query by exact name |
//! | `:quit` | Leave the console |

use carbon_core::{query::QueryRunner, store::EmissionStore};
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};

use crate::render;

enum Command<'a> {
  Sql(&'a str),
  Prev,
  Next,
  Run,
  History,
  Canned(&'a str),
  Quit,
  Unknown(&'a str),
}

fn parse(line: &str) -> Option<Command<'_>> {
  let line = line.trim();
  if line.is_empty() {
    return None;
  }
  let Some(cmd) = line.strip_prefix(':') else {
    return Some(Command::Sql(line));
  };
  let (name, arg) = cmd.split_once(' ').unwrap_or((cmd, ""));
  Some(match name {
    "prev" => Command::Prev,
    "next" => Command::Next,
    "run" => Command::Run,
    "history" => Command::History,
    "canned" => Command::Canned(arg.trim()),
    "quit" | "q" | "exit" => Command::Quit,
    _ => Command::Unknown(name),
  })
}

async fn run_sql<S: EmissionStore>(runner: &mut QueryRunner<'_, S>, sql: &str) {
  match runner.run(sql).await {
    Ok(outcome) => println!("{}", render::outcome(&outcome)),
    Err(e) => eprintln!("error: {e}"),
  }
}

/// Read statements from stdin until EOF or `:quit`.
pub async fn run<S: EmissionStore>(store: &S) -> anyhow::Result<()> {
  let mut runner = QueryRunner::new(store);
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut stdout = tokio::io::stdout();
  // The history entry most recently shown by :prev or :next.
  let mut loaded: Option<String> = None;

  loop {
    stdout.write_all(b"sql> ").await?;
    stdout.flush().await?;
    let Some(line) = lines.next_line().await? else { break };

    match parse(&line) {
      None => {}
      Some(Command::Sql(sql)) => run_sql(&mut runner, sql).await,
      Some(Command::Prev) => {
        loaded = runner.previous().map(str::to_owned);
        match &loaded {
          Some(sql) => println!("{sql}"),
          None => println!("(no earlier entry)"),
        }
      }
      Some(Command::Next) => {
        loaded = runner.next().map(str::to_owned);
        match &loaded {
          Some(sql) => println!("{sql}"),
          None => println!("(no later entry)"),
        }
      }
      Some(Command::Run) => {
        let sql = loaded.take().or_else(|| runner.history().current().map(str::to_owned));
        match sql {
          Some(sql) => run_sql(&mut runner, &sql).await,
          None => println!("(history is empty)"),
        }
      }
      Some(Command::History) => {
        for (i, sql) in runner.history().entries().iter().enumerate() {
          let marker = if runner.history().cursor() == Some(i) { '>' } else { ' ' };
          println!("{marker}{:>3}  {sql}", i + 1);
        }
      }
      Some(Command::Canned(name)) => match runner.run_canned(name).await {
        Ok((query, outcome)) => println!("-- {}\n{}", query.name, render::outcome(&outcome)),
        Err(e) => eprintln!("error: {e}"),
      },
      Some(Command::Quit) => break,
      Some(Command::Unknown(name)) => eprintln!("unknown command :{name}"),
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_lines_are_ignored() {
    assert!(parse("   ").is_none());
  }

  #[test]
  fn sql_is_passed_through_trimmed() {
    assert!(matches!(parse("  SELECT 1 "), Some(Command::Sql("SELECT 1"))));
  }

  #[test]
  fn commands_take_an_argument() {
    assert!(matches!(parse(":canned Show All Users"), Some(Command::Canned("Show All Users"))));
    assert!(matches!(parse(":prev"), Some(Command::Prev)));
    assert!(matches!(parse(":bogus"), Some(Command::Unknown("bogus"))));
  }
}
