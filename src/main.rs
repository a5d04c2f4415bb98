//! amortization-engine CLI
//!
//! Build loan amortization schedules from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Constant-installment schedule for 100k at 12% a year over 60 months
//! amortization-engine schedule --principal 100000 --rate 0.12 --term 60 --system price
//!
//! # Output as JSON
//! amortization-engine schedule --principal 100000 --rate 0.12 --term 60 --format json
//!
//! # Compare SAC, PRICE and SAM side by side
//! amortization-engine compare --principal 100000 --rate 0.12 --term 60
//! ```

use amortization_engine::analysis::comparison::ScheduleComparison;
use amortization_engine::core::schedule::AmortizationSystem;
use amortization_engine::systems::ScheduleEngine;
use rust_decimal::Decimal;
use std::fmt;
use std::process;
use std::str::FromStr;
use thiserror::Error;

fn print_usage() {
    eprintln!(
        r#"amortization-engine — loan amortization schedules (SAC, PRICE, SAM)

USAGE:
    amortization-engine <COMMAND> [OPTIONS]

COMMANDS:
    schedule    Build the full schedule for one amortization system
    compare     Run every system for the same loan and compare totals
    help        Show this message

OPTIONS (schedule, compare):
    --principal <AMOUNT>  Amount borrowed, greater than zero
    --rate <RATE>         Annual rate as a decimal fraction (0.12 = 12%)
    --term <MONTHS>       Number of monthly installments, greater than zero
    --format <FORMAT>     Output format: text (default) or json

OPTIONS (schedule):
    --system <SYSTEM>     sac (default), price or sam

Set RUST_LOG=debug to trace the computation.

EXAMPLES:
    amortization-engine schedule --principal 100000 --rate 0.12 --term 60
    amortization-engine schedule --principal 250000 --rate 0.095 --term 360 --system price
    amortization-engine compare --principal 100000 --rate 0.12 --term 60 --format json"#
    );
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

/// Loan options shared by every command.
#[derive(Debug, PartialEq)]
struct LoanArgs {
    principal: Decimal,
    rate: Decimal,
    term: u32,
    format: OutputFormat,
    system: AmortizationSystem,
}

/// Command-line errors, reported before any schedule is computed.
#[derive(Debug, PartialEq, Eq, Error)]
enum ArgError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{flag} requires {expected}")]
    MissingValue {
        flag: &'static str,
        expected: &'static str,
    },
    #[error("Invalid value '{value}' for {flag}: {reason}")]
    InvalidValue {
        flag: &'static str,
        value: String,
        reason: String,
    },
    #[error("Unknown option: {0}")]
    UnknownOption(String),
}

fn flag_value<'a>(
    args: &'a [String],
    idx: usize,
    flag: &'static str,
    expected: &'static str,
) -> Result<&'a str, ArgError> {
    args.get(idx)
        .map(String::as_str)
        .ok_or(ArgError::MissingValue { flag, expected })
}

fn parse_flag<T>(raw: &str, flag: &'static str) -> Result<T, ArgError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ArgError::InvalidValue {
        flag,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_loan_args(args: &[String], allow_system: bool) -> Result<LoanArgs, ArgError> {
    let mut principal = None;
    let mut rate = None;
    let mut term = None;
    let mut format = OutputFormat::Text;
    let mut system = AmortizationSystem::ConstantAmortization;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--principal" => {
                i += 1;
                let raw = flag_value(args, i, "--principal", "an amount")?;
                principal = Some(parse_flag::<Decimal>(raw, "--principal")?);
            }
            "--rate" => {
                i += 1;
                let raw = flag_value(args, i, "--rate", "a decimal fraction")?;
                rate = Some(parse_flag::<Decimal>(raw, "--rate")?);
            }
            "--term" => {
                i += 1;
                let raw = flag_value(args, i, "--term", "a whole number of months")?;
                term = Some(parse_flag::<u32>(raw, "--term")?);
            }
            "--format" => {
                i += 1;
                format = match flag_value(args, i, "--format", "'text' or 'json'")? {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    other => {
                        return Err(ArgError::InvalidValue {
                            flag: "--format",
                            value: other.to_string(),
                            reason: "expected 'text' or 'json'".to_string(),
                        })
                    }
                };
            }
            "--system" if allow_system => {
                i += 1;
                let raw = flag_value(args, i, "--system", "sac, price or sam")?;
                system = parse_flag::<AmortizationSystem>(raw, "--system")?;
            }
            other => return Err(ArgError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    Ok(LoanArgs {
        principal: principal.ok_or(ArgError::Missing("--principal <AMOUNT>"))?,
        rate: rate.ok_or(ArgError::Missing("--rate <RATE>"))?,
        term: term.ok_or(ArgError::Missing("--term <MONTHS>"))?,
        format,
        system,
    })
}

fn loan_args_or_exit(args: &[String], allow_system: bool) -> LoanArgs {
    parse_loan_args(args, allow_system).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing output: {}", e);
        process::exit(1);
    })
}

fn cmd_schedule(args: &[String]) {
    let loan = loan_args_or_exit(args, true);

    let schedule = ScheduleEngine::compute(loan.system, loan.principal, loan.rate, loan.term)
        .unwrap_or_else(|e| {
            eprintln!("Error in {} calculation: {}", loan.system, e);
            process::exit(1);
        });

    if loan.format == OutputFormat::Json {
        println!("{}", to_json(&schedule));
    } else {
        println!("{}", schedule);
    }
}

fn cmd_compare(args: &[String]) {
    let loan = loan_args_or_exit(args, false);
    let comparison = ScheduleComparison::run(loan.principal, loan.rate, loan.term);

    if loan.format == OutputFormat::Json {
        println!("{}", to_json(&comparison));
    } else {
        println!("{}", comparison);
    }

    if !comparison.all_computed() {
        process::exit(1);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "schedule" => cmd_schedule(rest),
        "compare" => cmd_compare(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_schedule_args() {
        let parsed = parse_loan_args(
            &args(&[
                "--principal", "100000", "--rate", "0.12", "--term", "60", "--system", "price",
                "--format", "json",
            ]),
            true,
        )
        .unwrap();
        assert_eq!(
            parsed,
            LoanArgs {
                principal: dec!(100000),
                rate: dec!(0.12),
                term: 60,
                format: OutputFormat::Json,
                system: AmortizationSystem::ConstantInstallment,
            }
        );
    }

    #[test]
    fn test_defaults() {
        let parsed =
            parse_loan_args(&args(&["--principal", "500", "--rate", "0", "--term", "5"]), true)
                .unwrap();
        assert_eq!(parsed.format, OutputFormat::Text);
        assert_eq!(parsed.system, AmortizationSystem::ConstantAmortization);
    }

    #[test]
    fn test_missing_required_option() {
        let err = parse_loan_args(&args(&["--rate", "0.12", "--term", "60"]), true).unwrap_err();
        assert_eq!(err, ArgError::Missing("--principal <AMOUNT>"));
        assert_eq!(err.to_string(), "--principal <AMOUNT> is required");
    }

    #[test]
    fn test_flag_without_value() {
        let err = parse_loan_args(&args(&["--principal", "100", "--term"]), true).unwrap_err();
        assert!(matches!(err, ArgError::MissingValue { flag: "--term", .. }));
    }

    #[test]
    fn test_non_numeric_values() {
        let err = parse_loan_args(&args(&["--principal", "lots"]), true).unwrap_err();
        assert!(matches!(err, ArgError::InvalidValue { flag: "--principal", .. }));

        let err = parse_loan_args(&args(&["--term", "-3"]), true).unwrap_err();
        assert!(matches!(err, ArgError::InvalidValue { flag: "--term", .. }));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = parse_loan_args(
            &args(&["--principal", "1", "--rate", "0", "--term", "1", "--format", "csv"]),
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ArgError::InvalidValue { flag: "--format", ref value, .. } if value == "csv"
        ));
    }

    #[test]
    fn test_unknown_system_rejected() {
        let err = parse_loan_args(&args(&["--system", "german"]), true).unwrap_err();
        assert!(matches!(err, ArgError::InvalidValue { flag: "--system", .. }));
    }

    #[test]
    fn test_system_not_accepted_by_compare() {
        let err = parse_loan_args(&args(&["--system", "sam"]), false).unwrap_err();
        assert_eq!(err, ArgError::UnknownOption("--system".to_string()));
    }

    #[test]
    fn test_unknown_option() {
        let err = parse_loan_args(&args(&["--currency", "BRL"]), true).unwrap_err();
        assert_eq!(err.to_string(), "Unknown option: --currency");
    }

    #[test]
    fn test_parsed_args_build_schedule() {
        let parsed = parse_loan_args(
            &args(&["--principal", "100000", "--rate", "0.12", "--term", "60", "--system", "sam"]),
            true,
        )
        .unwrap();
        let schedule =
            ScheduleEngine::compute(parsed.system, parsed.principal, parsed.rate, parsed.term)
                .unwrap();
        assert_eq!(schedule.total_interest().round_dp(2), dec!(30277.50));
    }
}
