//! Sample Applicant Generator
//!
//! Writes random applicants within the entry-form bounds as JSON lines, for
//! feeding `insurance-cost-predictor predict` in batch mode.

use clap::Parser;
use insurance_cost_predictor::{Applicant, YesNo};
use rand::Rng;
use std::io::{self, BufWriter, Write};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "sample-applicants", about = "Generate random insurance applicants")]
struct Args {
    /// Number of applicants to generate
    #[arg(short = 'n', long, default_value_t = 100)]
    count: u64,

    /// Probability of answering "Yes" to each health question
    #[arg(long, default_value_t = 0.2, value_parser = parse_probability)]
    yes_rate: f64,
}

fn parse_probability(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not a probability between 0 and 1", raw))
    }
}

/// Applicant generator for testing
struct ApplicantGenerator {
    rng: rand::rngs::ThreadRng,
    yes_rate: f64,
}

impl ApplicantGenerator {
    fn new(yes_rate: f64) -> Self {
        Self {
            rng: rand::thread_rng(),
            yes_rate,
        }
    }

    fn answer(&mut self) -> YesNo {
        YesNo::from(self.rng.gen_bool(self.yes_rate))
    }

    fn generate(&mut self) -> Applicant {
        // Rounded to one decimal like the form input
        let bmi = (self.rng.gen_range(15.0..45.0_f64) * 10.0).round() / 10.0;

        Applicant {
            age: self.rng.gen_range(18..=100),
            diabetes: self.answer(),
            blood_pressure_problems: self.answer(),
            known_allergies: self.answer(),
            any_chronic_diseases: self.answer(),
            any_transplants: self.answer(),
            history_of_cancer_in_family: self.answer(),
            number_of_major_surgeries: self.rng.gen_range(0..=3),
            bmi,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_applicants=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut generator = ApplicantGenerator::new(args.yes_rate);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for _ in 0..args.count {
        serde_json::to_writer(&mut out, &generator.generate())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    info!(count = args.count, yes_rate = args.yes_rate, "Generated applicants");
    Ok(())
}
