use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

/// taxcalc - annualized income and after-tax totals in your terminal
#[derive(Parser, Debug)]
#[command(name = "taxcalc")]
#[command(about = "Estimate annualized salaried and freelance income, before and after taxes")]
#[command(version)]
pub struct Cli {
    /// Configuration file (tax rates, row defaults, language)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file. In the interactive form, logs are discarded otherwise.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive income form (default)
    Run,
    /// Compute totals for incomes given on the command line
    Estimate {
        /// Monthly salary of a salaried income (repeatable)
        #[arg(short, long, value_name = "AMOUNT")]
        monthly: Vec<f64>,
        /// Freelance income as RATE:HOURS_PER_DAY:DAYS_PER_YEAR (repeatable)
        #[arg(short, long, value_name = "RATE:HOURS:DAYS")]
        freelance: Vec<FreelanceSpec>,
        /// Year of every income (defaults to the configured year)
        #[arg(short, long)]
        year: Option<f64>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write the default configuration to a file
    Init {
        /// Destination path
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        path: PathBuf,
    },
}

/// A freelance income given as `RATE:HOURS:DAYS`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreelanceSpec {
    pub hourly_rate: f64,
    pub hours_per_day: f64,
    pub days_per_year: f64,
}

impl FromStr for FreelanceSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [rate, hours, days] = parts.as_slice() else {
            return Err(format!(
                "expected RATE:HOURS:DAYS (e.g. 50:8:220), got '{}'",
                s
            ));
        };
        let parse = |name: &str, text: &str| {
            text.trim()
                .parse::<f64>()
                .map_err(|_| format!("{} '{}' is not a number", name, text))
        };
        Ok(Self {
            hourly_rate: parse("rate", rate)?,
            hours_per_day: parse("hours per day", hours)?,
            days_per_year: parse("days per year", days)?,
        })
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["taxcalc"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_estimate() {
        let cli = Cli::try_parse_from([
            "taxcalc",
            "estimate",
            "--monthly",
            "1000",
            "--monthly",
            "2500.5",
            "--freelance",
            "50:8:220",
            "--year",
            "2023",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Estimate {
                monthly,
                freelance,
                year,
                json,
            }) => {
                assert_eq!(monthly, vec![1000.0, 2500.5]);
                assert_eq!(
                    freelance,
                    vec![FreelanceSpec {
                        hourly_rate: 50.0,
                        hours_per_day: 8.0,
                        days_per_year: 220.0
                    }]
                );
                assert_eq!(year, Some(2023.0));
                assert!(json);
            }
            other => panic!("Expected Estimate command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_bad_freelance_spec() {
        let result = Cli::try_parse_from(["taxcalc", "estimate", "--freelance", "50:8"]);
        assert!(result.is_err());
        let result = Cli::try_parse_from(["taxcalc", "estimate", "--freelance", "a:8:220"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli = Cli::try_parse_from(["taxcalc", "run", "--config", "/tmp/taxcalc.json"]).unwrap();
        assert_eq!(cli.config.unwrap().to_str().unwrap(), "/tmp/taxcalc.json");
        assert!(matches!(cli.command, Some(Commands::Run)));
    }

    #[test]
    fn test_cli_config_commands() {
        let cli = Cli::try_parse_from(["taxcalc", "config", "init", "out.json", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigCommands::Init { path, force },
            }) => {
                assert_eq!(path.to_str().unwrap(), "out.json");
                assert!(force);
            }
            other => panic!("Expected config init, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["taxcalc", "config", "validate", "in.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Validate { .. }
            })
        ));
    }

    #[test]
    fn test_freelance_spec_from_str() {
        let spec: FreelanceSpec = "45.5: 7 :200".parse().unwrap();
        assert_eq!(spec.hourly_rate, 45.5);
        assert_eq!(spec.hours_per_day, 7.0);
        assert_eq!(spec.days_per_year, 200.0);
        assert!("1:2:3:4".parse::<FreelanceSpec>().is_err());
    }
}
