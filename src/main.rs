use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};

use dendron::backend;
use dendron::backend::machine::{self, Machine};
use dendron::lexer;
use dendron::tree::ParseTree;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mut backend_name: Option<String> = None;
    let mut input_path: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--backend" | "-b" => {
                backend_name = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("Missing backend name after {arg}"))?,
                );
            }
            _ => {
                input_path = Some(arg);
                if args.next().is_some() {
                    bail!("Only one input file is supported");
                }
                break;
            }
        }
    }

    let source = if let Some(path) = input_path {
        fs::read_to_string(&path).with_context(|| format!("Reading {path}"))?
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading stdin")?;
        buffer
    };

    let mut tokens = lexer::tokenize(&source);
    let tree = ParseTree::new(&mut tokens)?;

    if let Some(name) = backend_name {
        return run_backend(&name, &tree);
    }

    // Full pipeline: infix listing, direct interpretation, compiled
    // listing, then the machine run over the same program.
    print!("{}", tree.display_program());

    println!("\nInterpreting the parse tree...");
    let interpreted = tree.interpret()?;
    for line in &interpreted.printed {
        println!("{line}");
    }
    println!("Interpretation complete.");
    if !interpreted.table.is_empty() {
        println!();
        println!("{}", interpreted.table.dump());
    }

    let instructions = tree.compile();
    print!("{}", machine::display_instructions(&instructions));

    println!("\nExecuting compiled code...");
    let run = Machine::new().execute(&instructions)?;
    for line in &run.printed {
        println!("{line}");
    }
    println!(
        "Machine: execution ended with {} items left on the stack.",
        run.stack_depth
    );
    if !run.table.is_empty() {
        println!();
        println!("{}", run.table.dump());
    }
    Ok(())
}

fn run_backend(name: &str, tree: &ParseTree) -> Result<()> {
    for mut backend in backend::backends() {
        if backend.name() == name {
            let execution = backend.run(tree.root())?;
            for line in &execution.printed {
                println!("{line}");
            }
            if !execution.table.is_empty() {
                println!("{}", execution.table.dump());
            }
            return Ok(());
        }
    }
    bail!("Unknown backend '{name}'")
}
