//! # Lookup Subcommand
//!
//! One-off vocabulary query: resolves a term by label within one
//! collection and prints the matched concept, or reports that the term
//! is absent.

use anyhow::Context;
use clap::Args;
use ogv_core::CollectionId;
use ogv_vocab::{MatchKind, MatchPolicy, NvsClient, NvsConfig, VocabLookup};

/// Arguments for the lookup subcommand.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Term text to search for.
    pub term: String,

    /// Collection to search in (e.g. L22).
    #[arg(long)]
    pub collection: String,

    /// Base URL of the vocabulary server.
    #[arg(long, default_value = ogv_vocab::http::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Close-match policy: exact, case-insensitive or normalized.
    #[arg(long, default_value = "normalized")]
    pub match_policy: MatchPolicy,
}

/// Run a single term lookup and print the result.
pub fn run(args: LookupArgs) -> anyhow::Result<()> {
    let collection = CollectionId::new(&args.collection)
        .with_context(|| format!("'{}' is not a collection id", args.collection))?;
    let client = NvsClient::new(NvsConfig {
        base_url: args.base_url,
        timeout_secs: args.timeout_secs,
        policy: args.match_policy,
    })?;

    match client.lookup(&args.term, &collection)? {
        None => {
            println!("'{}' not found in {collection}", args.term);
        }
        Some(matched) => {
            if matched.kind == MatchKind::Close {
                println!("'{}' matched as '{}'", args.term, matched.concept.pref_label);
            } else {
                println!("{}", matched.concept.pref_label);
            }
            println!("{}", matched.concept.uri);
            if let Some(definition) = &matched.concept.definition {
                println!("{definition}");
            }
        }
    }
    Ok(())
}
