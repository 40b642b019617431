use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};

use crate::backend::{self, Execution};
use crate::lexer;
use crate::parser;

fn transcript(execution: &Execution) -> String {
    let mut lines = execution.printed.clone();
    if !execution.table.is_empty() {
        lines.push(execution.table.dump());
    }
    lines.join("\n")
}

fn normalize(output: &str) -> String {
    output
        .replace("\r\n", "\n")
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

#[test]
fn runs_programs_across_backends() -> Result<()> {
    let programs_dir = Path::new("tests/programs");
    let mut programs = Vec::new();

    for entry in
        fs::read_dir(programs_dir).with_context(|| format!("Reading {}", programs_dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("den") {
            programs.push(path);
        }
    }

    ensure!(
        !programs.is_empty(),
        "No .den programs found in {}",
        programs_dir.display()
    );
    programs.sort();

    for path in programs {
        let source =
            fs::read_to_string(&path).with_context(|| format!("Reading {}", path.display()))?;
        let parsed = parser::parse(&mut lexer::tokenize(&source));

        let expected_error_path = path.with_extension("err");
        if expected_error_path.exists() {
            let expected_error = fs::read_to_string(&expected_error_path)
                .with_context(|| format!("Reading {}", expected_error_path.display()))?;
            let expected_error = expected_error.trim();

            match parsed {
                Err(fault) => {
                    let error = fault.to_string();
                    ensure!(
                        error.contains(expected_error),
                        "Expected error containing '{expected_error}', got '{error}' for {}",
                        path.display()
                    );
                }
                Ok(program) => {
                    // Runtime faults must surface identically from both
                    // execution strategies.
                    for mut backend in backend::backends() {
                        let result = backend.run(&program);
                        ensure!(
                            result.is_err(),
                            "Expected error for backend {} in {}",
                            backend.name(),
                            path.display()
                        );
                        let error = result.err().unwrap().to_string();
                        ensure!(
                            error.contains(expected_error),
                            "Expected error containing '{expected_error}', got '{error}' for backend {} in {}",
                            backend.name(),
                            path.display()
                        );
                    }
                }
            }
            continue;
        }

        let program = parsed.with_context(|| format!("Parsing {}", path.display()))?;
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path)
            .with_context(|| format!("Reading {}", expected_path.display()))?;
        let expected_output = normalize(&expected);

        let mut executions = Vec::new();
        for mut backend in backend::backends() {
            let execution = backend.run(&program).with_context(|| {
                format!("Backend {} failed for {}", backend.name(), path.display())
            })?;
            ensure!(
                execution.stack_depth == 0,
                "Backend {} left {} operands on the stack for {}",
                backend.name(),
                execution.stack_depth,
                path.display()
            );
            let actual_output = normalize(&transcript(&execution));
            assert_eq!(
                actual_output,
                expected_output,
                "Backend {} mismatch for {}",
                backend.name(),
                path.display()
            );
            executions.push(execution);
        }

        // Beyond matching the fixture, the strategies must agree with
        // each other on printed values and final bindings.
        ensure!(
            executions
                .windows(2)
                .all(|pair| pair[0].printed == pair[1].printed && pair[0].table == pair[1].table),
            "Backends disagree for {}",
            path.display()
        );
    }

    Ok(())
}
