use std::path::PathBuf;

use carreview_rag::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn test_parse_query() {
    let cli = Cli::try_parse_from(["carreview", "query", "מה דעתכם על Corolla?", "--top-k", "3"])
        .unwrap();

    assert!(!cli.json);
    match cli.command {
        Commands::Query(args) => {
            assert_eq!(args.text, "מה דעתכם על Corolla?");
            assert_eq!(args.top_k, Some(3));
            assert!(!args.context);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_query_defaults() {
    let cli = Cli::try_parse_from(["carreview", "query", "Mazda"]).unwrap();

    match cli.command {
        Commands::Query(args) => assert_eq!(args.top_k, None),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "carreview",
        "ingest",
        "--json",
        "--config",
        "conf/prod.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("conf/prod.yaml")));
    assert!(matches!(cli.command, Commands::Ingest));
}

#[test]
fn test_parse_entities_with_query() {
    let cli = Cli::try_parse_from(["carreview", "entities", "--query", "corolla"]).unwrap();

    match cli.command {
        Commands::Entities(args) => assert_eq!(args.query.as_deref(), Some("corolla")),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_pipeline_commands() {
    for (name, expected) in [("corpus", 0), ("index", 1), ("ingest", 2)] {
        let cli = Cli::try_parse_from(["carreview", name]).unwrap();
        let got = match cli.command {
            Commands::Corpus => 0,
            Commands::Index => 1,
            Commands::Ingest => 2,
            _ => panic!("Wrong top-level command"),
        };
        assert_eq!(got, expected);
    }
}

#[test]
fn test_query_requires_text() {
    assert!(Cli::try_parse_from(["carreview", "query"]).is_err());
}

#[test]
fn test_invalid_top_k_rejected() {
    assert!(Cli::try_parse_from(["carreview", "query", "x", "--top-k", "many"]).is_err());
}
