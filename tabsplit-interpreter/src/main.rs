#![warn(clippy::uninlined_format_args)]

mod config;

use config::AppConfig;
use std::{borrow::Cow, env, fs, process};
use tabsplit_application::BillProcessor;
use tabsplit_infrastructure::{TabsplitBillParser, TabsplitChargeParser};
use tabsplit_presentation::{
    PayerSelectionPresenter, SettlementPresenter, format_bill_load_error, format_session_error,
};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "Usage: tabsplit [--preview] <bill-file>";

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (warnings only by default).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    path: String,
    preview: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> CliResult<CliArgs> {
    let mut path = None;
    let mut preview = false;

    for arg in args {
        match arg.as_str() {
            "--preview" => preview = true,
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{flag}'\n{USAGE}").into());
            }
            _ if path.is_some() => return Err(USAGE.into()),
            _ => path = Some(arg),
        }
    }

    let Some(path) = path else {
        return Err(USAGE.into());
    };
    Ok(CliArgs { path, preview })
}

fn run() -> CliResult<()> {
    let args = parse_args(env::args().skip(1))?;
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;

    let source = fs::read_to_string(&args.path)
        .map_err(|err| format!("Failed to read '{}': {err}", args.path))?;

    let processor = BillProcessor::new(&TabsplitChargeParser, &TabsplitBillParser)
        .with_context(config.context);
    let output = render_bill(&processor, &source, args.preview)?;
    println!("{output}");

    Ok(())
}

fn render_bill(processor: &BillProcessor<'_>, source: &str, preview: bool) -> CliResult<String> {
    let context = processor.context();
    let step = processor
        .load_bill(source)
        .map_err(format_bill_load_error)?;

    let mut sections = Vec::new();
    if preview {
        sections.push(PayerSelectionPresenter::render(&step, context));
    }

    let summary = step
        .summary()
        .map_err(|err| format_session_error(&err))?;
    sections.push(SettlementPresenter::render(&summary, context).to_text());

    Ok(sections.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tabsplit_i18n as i18n;

    #[fixture]
    fn processor() -> BillProcessor<'static> {
        BillProcessor::new(&TabsplitChargeParser, &TabsplitBillParser)
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case::path_only(&["dinner.bill"], false)]
    #[case::preview_first(&["--preview", "dinner.bill"], true)]
    #[case::preview_last(&["dinner.bill", "--preview"], true)]
    fn parses_arguments(#[case] values: &[&str], #[case] preview: bool) {
        assert_eq!(
            parse_args(args(values)),
            Ok(CliArgs {
                path: "dinner.bill".to_string(),
                preview,
            })
        );
    }

    #[rstest]
    #[case::missing_path(&[])]
    #[case::two_paths(&["a.bill", "b.bill"])]
    #[case::unknown_flag(&["--verbose", "a.bill"])]
    fn rejects_bad_arguments(#[case] values: &[&str]) {
        assert!(parse_args(args(values)).is_err());
    }

    #[rstest]
    fn renders_summary(processor: BillProcessor<'static>) {
        let source = "MEMBERS := Alice, Bob\nAlice: 30 Pasta\nBob: 10 Salad\nPAYERS := Alice\n";

        let output = render_bill(&processor, source, false).expect("render");

        assert!(output.starts_with(&format!("{}: 40.00\n", i18n::TOTAL_AMOUNT)));
        assert!(output.lines().any(|line| {
            line.starts_with("| Bob ") && line.contains("| Alice ") && line.ends_with(" 10.00 |")
        }));
    }

    #[rstest]
    fn preview_comes_before_summary(processor: BillProcessor<'static>) {
        let source = "MEMBERS := A, B\nA: 10\nB: 10\nPAYERS := A, B\n";

        let output = render_bill(&processor, source, true).expect("render");

        assert!(output.contains(i18n::PAYING));
        assert!(output.ends_with(i18n::ALL_SETTLED));
    }

    #[rstest]
    fn missing_payers_is_an_error(processor: BillProcessor<'static>) {
        let result = render_bill(&processor, "MEMBERS := A, B\nA: 10\n", false);

        assert_eq!(result, Err(Cow::Borrowed(i18n::NO_PAYER_SELECTED)));
    }

    #[rstest]
    fn undefined_member_is_reported_with_line(processor: BillProcessor<'static>) {
        let result = render_bill(&processor, "MEMBERS := A\nB: 10\n", false);

        assert_eq!(
            result,
            Err(Cow::Owned(i18n::at_line(i18n::undefined_member("B"), 2)))
        );
    }

    #[rstest]
    fn amounts_beyond_range_are_reported(processor: BillProcessor<'static>) {
        let source = "MEMBERS := A, B\nA: 10\nTAX := 79228162514264337593543950335\nPAYERS := A\n";

        let result = render_bill(&processor, source, false);

        assert_eq!(
            result,
            Err(Cow::Owned(i18n::at_line(i18n::AMOUNT_OVERFLOW, 3)))
        );
    }
}
