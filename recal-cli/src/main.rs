// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod cli;

use std::error::Error;
use std::fs::File;
use std::io::{self, Write};

use clap::Parser;
use recal_core::{generate_calendar_mode, generate_capped, generate_range, is_member};

use crate::cli::{Cli, Commands, GenerateArgs, MembersArgs};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate(&args),
        Commands::Members(args) => members(&args),
    }
}

fn generate(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    tracing::debug!(rrule = %args.rrule, "parsing rule");
    let rule = recal_ical::parse(&args.rrule)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    let occurrences: Box<dyn Iterator<Item = recal_ical::DateTimeValue>> =
        match (args.range_start, args.range_end) {
            (Some(start), Some(end)) => Box::new(generate_range(&rule, args.anchor, start, end)),
            _ if args.calendar_mode => Box::new(generate_calendar_mode(&rule, args.anchor)),
            _ => Box::new(generate_capped(&rule, args.anchor, args.limit)),
        };

    for occurrence in occurrences {
        writeln!(out, "{occurrence}")?;
    }
    Ok(())
}

fn members(args: &MembersArgs) -> Result<(), Box<dyn Error>> {
    tracing::debug!(rrule = %args.rrule, "parsing rule");
    let rule = recal_ical::parse(&args.rrule)?;
    let matches = is_member(&rule, args.anchor, args.candidate);
    println!("{matches}");
    if !matches {
        std::process::exit(1);
    }
    Ok(())
}
