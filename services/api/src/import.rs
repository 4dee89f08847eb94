use crate::infra::init_offline;
use clap::Args;
use lending_platform::error::AppError;
use lending_platform::lending::{
    InMemoryLoanRepository, LendingService, LendingServiceError, LoanBatchImporter,
    LoanRepository, LoanRequest,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV export with Loan Amount, Secured Asset Value and Credit Score columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print each decision before the statistics
    #[arg(long)]
    pub(crate) list: bool,
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    init_offline()?;
    let requests = LoanBatchImporter::from_path(&args.csv)?;
    info!(path = %args.csv.display(), rows = requests.len(), "loan batch loaded");

    let service = LendingService::new(Arc::new(InMemoryLoanRepository::default()));
    let stdout = std::io::stdout();
    decide_batch(requests, args.list, &service, stdout.lock())
}

/// Decides every request in order and prints the portfolio statistics.
/// Rows with non-positive amounts are skipped with a warning.
pub(crate) fn decide_batch<R, O>(
    requests: Vec<LoanRequest>,
    list: bool,
    service: &LendingService<R>,
    mut output: O,
) -> Result<(), AppError>
where
    R: LoanRepository + 'static,
    O: Write,
{
    for (index, request) in requests.into_iter().enumerate() {
        let row = index + 1;
        match service.submit(request) {
            Ok(record) => {
                if list {
                    writeln!(
                        output,
                        "row {row} {}: {}",
                        record.application_id,
                        record.application.summary()
                    )?;
                }
            }
            Err(LendingServiceError::InvalidRequest(err)) => {
                warn!(row, error = %err, "skipping loan row");
                if list {
                    writeln!(output, "row {row} skipped: {err}")?;
                }
            }
            Err(err) => return Err(err.into()),
        }
    }

    let statistics = service.statistics()?;
    let rendered = serde_json::to_string_pretty(&statistics).map_err(std::io::Error::from)?;
    writeln!(output, "{rendered}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = "Loan Amount,Secured Asset Value,Credit Score\n\
500000,1000000,800\n\
400000,1000000,800\n\
600000,1000000,700\n\
1000000,1500000,900\n";

    fn decide(csv: &str, list: bool) -> (String, Arc<InMemoryLoanRepository>) {
        let requests = LoanBatchImporter::from_reader(csv.as_bytes()).expect("csv parses");
        let repository = Arc::new(InMemoryLoanRepository::default());
        let service = LendingService::new(repository.clone());
        let mut output = Vec::new();

        decide_batch(requests, list, &service, &mut output).expect("batch decided");

        (String::from_utf8(output).expect("utf8 output"), repository)
    }

    #[test]
    fn prints_statistics_for_the_batch() {
        let (output, repository) = decide(BATCH, false);

        let statistics: serde_json::Value =
            serde_json::from_str(&output).expect("statistics json");
        assert_eq!(statistics["numberOfApprovedLoans"], 2);
        assert_eq!(statistics["numberOfDeclinedLoans"], 2);
        assert_eq!(statistics["totalValueOfLoansWritten"], serde_json::json!(900000));
        assert_eq!(statistics["meanAverageLoanToValueRatio"], "54.17");
        assert_eq!(repository.list_all().expect("snapshot").len(), 4);
    }

    #[test]
    fn listing_reports_each_decision_and_skipped_rows() {
        let csv = "Loan Amount,Secured Asset Value,Credit Score\n\
500000,1000000,800\n\
0,1000000,800\n";

        let (output, repository) = decide(csv, true);

        assert!(output.starts_with("row 1 loan-"));
        assert!(output.contains("loan approved"));
        assert!(output.contains("row 2 skipped: loan_amount must be greater than zero"));
        assert_eq!(repository.list_all().expect("snapshot").len(), 1);
    }
}
