use crate::infra::{init_offline, parse_credit_score, parse_positive_amount};
use clap::Args;
use lending_platform::error::AppError;
use lending_platform::lending::{
    InMemoryLoanRepository, LendingService, LoanRepository, LoanRequest,
};
use std::io::{BufRead, Write};
use std::sync::Arc;

const HELP_LINE: &str =
    "Invalid option. Please press 'q' to quit, 'o' for loans output, or 'i' to input a new loan application.";

#[derive(Args, Debug, Default)]
pub(crate) struct ConsoleArgs {}

pub(crate) fn run_console(_args: ConsoleArgs) -> Result<(), AppError> {
    init_offline()?;
    let service = LendingService::new(Arc::new(InMemoryLoanRepository::default()));
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    console_session(stdin.lock(), stdout.lock(), &service)
}

/// Drives the interactive loop until `q` or end of input.
pub(crate) fn console_session<I, O, R>(
    mut input: I,
    mut output: O,
    service: &LendingService<R>,
) -> Result<(), AppError>
where
    I: BufRead,
    O: Write,
    R: LoanRepository + 'static,
{
    writeln!(output, "Welcome to the Lending Platform!")?;
    writeln!(output, "Press 'q' to quit the application.")?;
    writeln!(output, "Press 'o' for loans output...")?;
    writeln!(output, "Press 'i' to input a new loan application...")?;

    while let Some(line) = read_line(&mut input)? {
        let command = line.trim().to_ascii_lowercase();
        let Some(first) = command.chars().next() else {
            continue;
        };

        match first {
            'q' => {
                writeln!(output, "Exiting the application. Goodbye!")?;
                return Ok(());
            }
            'i' => {
                let Some(request) = prompt_request(&mut input, &mut output)? else {
                    break;
                };
                let record = service.submit(request)?;
                writeln!(output, "Loan application saved!")?;
                writeln!(
                    output,
                    "{}: {}",
                    record.application_id,
                    record.application.summary()
                )?;
            }
            'o' => {
                let statistics = service.statistics()?;
                let rendered =
                    serde_json::to_string_pretty(&statistics).map_err(std::io::Error::from)?;
                writeln!(output, "{rendered}")?;
            }
            _ => writeln!(output, "{HELP_LINE}")?,
        }
    }

    Ok(())
}

fn prompt_request<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
) -> Result<Option<LoanRequest>, AppError> {
    let Some(loan_amount) = prompt_until(
        input,
        output,
        "Enter the loan amount: ",
        "Invalid input. Please enter a valid loan amount: ",
        parse_positive_amount,
    )?
    else {
        return Ok(None);
    };

    let Some(secured_asset_value) = prompt_until(
        input,
        output,
        "Enter the secured asset value: ",
        "Invalid input. Please enter a valid secured asset value: ",
        parse_positive_amount,
    )?
    else {
        return Ok(None);
    };

    let Some(credit_score) = prompt_until(
        input,
        output,
        "Enter the applicant's credit score (1-999): ",
        "Invalid input. Please enter a valid credit score (1-999): ",
        parse_credit_score,
    )?
    else {
        return Ok(None);
    };

    Ok(Some(LoanRequest {
        loan_amount,
        secured_asset_value,
        credit_score,
    }))
}

/// Re-prompts until `parse` accepts a line. `None` means the input ran out.
fn prompt_until<I, O, T, F>(
    input: &mut I,
    output: &mut O,
    prompt: &str,
    retry: &str,
    parse: F,
) -> Result<Option<T>, AppError>
where
    I: BufRead,
    O: Write,
    F: Fn(&str) -> Result<T, String>,
{
    write!(output, "{prompt}")?;
    output.flush()?;

    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match parse(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(_) => {
                write!(output, "{retry}")?;
                output.flush()?;
            }
        }
    }
}

fn read_line<I: BufRead>(input: &mut I) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
