//! Token command - prints tokens in the same format teams are issued

use std::io::Write;

use clap::Args;

use crate::domain::team::TeamToken;

#[derive(Debug, Args)]
pub struct TokenArgs {
    /// How many tokens to print
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10_000))]
    pub count: u32,
}

/// Print `args.count` tokens, one per line
pub fn run(args: TokenArgs) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_tokens(&mut stdout.lock(), args.count)
}

fn write_tokens(out: &mut impl Write, count: u32) -> anyhow::Result<()> {
    for _ in 0..count {
        writeln!(out, "{}", TeamToken::generate().as_str())?;
    }

    out.flush()?;
    Ok(())
}
