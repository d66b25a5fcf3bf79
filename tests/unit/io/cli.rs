//! Tests for command-line parsing and subcommand execution

#[cfg(test)]
mod tests {
    use clap::Parser;
    use log::LevelFilter;
    use ringca::AutomatonError;
    use ringca::analysis::trials::{Classifier, TrialReport};
    use ringca::automaton::{
        AutomatonEngine, MajorityParams, Outcome, RunResult, StoppingPolicy, TransitionFunction,
    };
    use ringca::io::cli::{
        ClassifierKind, Cli, Command, CommandRunner, describe_classification, format_sweep,
        history_to_text,
    };
    use ringca::io::configuration::{DEFAULT_SEED, DEFAULT_STEP_BUDGET, TRIAL_STEP_BUDGET};
    use ringca::io::corpus::read_corpus;
    use ringca::io::initial::{InitialPattern, single_seed};
    use ringca::io::trial_log::TRIAL_LOG_HEADER;
    use tempfile::TempDir;

    fn execute(args: &[&str]) -> ringca::Result<String> {
        CommandRunner::new(Cli::parse_from(args)).execute()
    }

    // Tests CLI parsing with only the subcommand and its required argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["ringca", "elementary", "--rule", "30"]);

        assert_eq!(cli.seed, DEFAULT_SEED);
        assert!(!cli.quiet);
        assert!(!cli.verbose);
        match cli.command {
            Command::Elementary(args) => {
                assert_eq!(args.rule, 30);
                assert_eq!(args.init, InitialPattern::Single);
                assert!(!args.run_through);
                assert!(args.render.output.is_none());
            }
            _ => unreachable!("parsed the wrong subcommand"),
        }
    }

    // Tests majority defaults are the classic GKL distances
    #[test]
    fn test_cli_parse_majority_defaults() {
        let cli = Cli::parse_from(["ringca", "majority"]);
        match cli.command {
            Command::Majority(args) => {
                assert_eq!((args.j, args.k), (1, 3));
                assert_eq!(args.budget, DEFAULT_STEP_BUDGET);
                assert_eq!(args.init, InitialPattern::Density(0.5));
            }
            _ => unreachable!("parsed the wrong subcommand"),
        }
    }

    // Tests global flags are accepted after the subcommand
    #[test]
    fn test_cli_parse_globals_anywhere() {
        let cli = Cli::parse_from([
            "ringca", "trials", "-c", "rule184", "--seed", "9", "--quiet",
        ]);
        assert_eq!(cli.seed, 9);
        assert!(cli.quiet);
        match cli.command {
            Command::Trials(args) => {
                assert_eq!(args.classifier, ClassifierKind::Rule184);
                assert_eq!(args.budget, TRIAL_STEP_BUDGET);
            }
            _ => unreachable!("parsed the wrong subcommand"),
        }
    }

    #[test]
    fn test_cli_rejects_conflicting_degenerate_flags() {
        let parsed = Cli::try_parse_from([
            "ringca",
            "majority",
            "--reject-degenerate",
            "--evolve-degenerate",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_rejects_bad_pattern() {
        assert!(Cli::try_parse_from(["ringca", "majority", "-i", "density:3"]).is_err());
    }

    // Tests progress display and log level follow the flags
    // Verified by inverting quiet flag logic
    #[test]
    fn test_verbosity() {
        let quiet = Cli::parse_from(["ringca", "-q", "majority"]);
        assert!(!quiet.should_show_progress());
        assert_eq!(quiet.log_level(), LevelFilter::Error);

        let verbose = Cli::parse_from(["ringca", "-v", "majority"]);
        assert!(verbose.should_show_progress());
        assert_eq!(verbose.log_level(), LevelFilter::Debug);

        let normal = Cli::parse_from(["ringca", "majority"]);
        assert_eq!(normal.log_level(), LevelFilter::Warn);
    }

    // Tests the elementary subcommand prints the history and a summary
    #[test]
    fn test_execute_elementary() {
        let output = execute(&[
            "ringca", "-q", "elementary", "-r", "184", "-n", "9", "-g", "2",
        ])
        .unwrap();
        assert_eq!(
            output,
            "...#.....\n....#....\n.....#...\nrule 184: 2 steps, final density 0.1111\n"
        );
    }

    #[test]
    fn test_execute_elementary_invalid_rule() {
        let result = execute(&["ringca", "-q", "elementary", "-r", "256"]);
        assert!(matches!(
            result,
            Err(AutomatonError::InvalidRuleNumber { value: 256 })
        ));
    }

    // Tests the majority subcommand reports the converged symbol and step count
    // Verified by reporting the initial majority instead of the converged one
    #[test]
    fn test_execute_majority() {
        let output = execute(&[
            "ringca",
            "-q",
            "majority",
            "-i",
            "bits:1110110111011001010",
            "-b",
            "100",
        ])
        .unwrap();
        assert!(output.ends_with(
            "The majority element is 1 and the automaton converged in 6 steps.\n"
        ));
        assert_eq!(output.lines().count(), 8);
    }

    #[test]
    fn test_execute_majority_invalid_distance() {
        let result = execute(&["ringca", "-q", "majority", "-k", "0"]);
        assert!(matches!(
            result,
            Err(AutomatonError::InvalidParameter { parameter: "k", .. })
        ));
    }

    // Tests homogeneous input under each degenerate handling mode
    #[test]
    fn test_execute_majority_degenerate() {
        let reported = execute(&["ringca", "-q", "majority", "-i", "bits:1111111"]).unwrap();
        assert!(reported.ends_with("already homogeneous (1); nothing to classify.\n"));

        let rejected = execute(&[
            "ringca",
            "-q",
            "majority",
            "-i",
            "bits:0000000",
            "--reject-degenerate",
        ]);
        assert!(matches!(
            rejected,
            Err(AutomatonError::DegenerateDensity { .. })
        ));

        let evolved = execute(&[
            "ringca",
            "-q",
            "majority",
            "-i",
            "bits:1111111",
            "--evolve-degenerate",
        ])
        .unwrap();
        assert!(evolved.ends_with("converged in 1 steps.\n"));
    }

    // Tests the PNG path is reported instead of the text history
    #[test]
    fn test_execute_majority_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("renders").join("gkl.png");
        let path_arg = path.to_string_lossy().to_string();

        let output = execute(&[
            "ringca",
            "-q",
            "majority",
            "-i",
            "bits:1110110111011001010",
            "-o",
            &path_arg,
            "--scale",
            "2",
        ])
        .unwrap();

        assert!(path.exists());
        assert!(output.starts_with("Wrote "));
        assert!(output.contains("converged in 6 steps"));
    }

    #[test]
    fn test_execute_rule184_trials() {
        let output = execute(&[
            "ringca",
            "-q",
            "trials",
            "-c",
            "rule184",
            "-t",
            "10",
            "-n",
            "41",
            "--density-min",
            "0.3",
            "--density-max",
            "0.7",
        ])
        .unwrap();
        assert_eq!(
            output,
            "rule 184: 100.00% correct (10/10 decided), 0 unanswered, mean 29.0 steps\n"
        );
    }

    // Tests a written corpus can be swept, one line per pair
    #[test]
    fn test_execute_corpus_then_sweep() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corpus.txt");
        let path_arg = path.to_string_lossy().to_string();

        let written = execute(&[
            "ringca",
            "-q",
            "corpus",
            "-o",
            &path_arg,
            "-n",
            "49",
            "--densities",
            "2",
            "--shuffles",
            "3",
        ])
        .unwrap();
        assert!(written.starts_with("Wrote 6 vectors of 49 cells"));
        assert_eq!(read_corpus(&path).unwrap().len(), 6);

        let swept = execute(&[
            "ringca", "-q", "sweep", "-p", "1:3,2:5", "-f", &path_arg, "-b", "120",
        ])
        .unwrap();
        let lines: Vec<&str> = swept.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.first().is_some_and(|line| line.starts_with("GKL (1, 3): ")));
        assert!(lines.get(1).is_some_and(|line| line.starts_with("GKL (2, 5): ")));
    }

    #[test]
    fn test_execute_sweep_bad_params() {
        let result = execute(&["ringca", "-q", "sweep", "-p", "1-3"]);
        assert!(matches!(
            result,
            Err(AutomatonError::InvalidParameter {
                parameter: "params",
                ..
            })
        ));
    }

    // Tests the cap stops a mixed ring before the budget
    #[test]
    fn test_execute_majority_cap() {
        let output = execute(&[
            "ringca",
            "-q",
            "majority",
            "-i",
            "bits:1101110110001000",
            "-b",
            "100",
            "--cap",
            "3",
        ])
        .unwrap();
        assert_eq!(output.lines().count(), 5);
        assert!(output.ends_with("did not converge within 3 steps (final density 0.4375).\n"));

        let zero = execute(&["ringca", "-q", "majority", "--cap", "0"]);
        assert!(matches!(
            zero,
            Err(AutomatonError::InvalidParameter {
                parameter: "convergence_cap",
                ..
            })
        ));
    }

    // Tests the trial log holds one line per trial after its header
    // Verified by writing only the summary line
    #[test]
    fn test_execute_trials_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("trials.txt");
        let path_arg = path.to_string_lossy().to_string();

        let output = execute(&[
            "ringca",
            "-q",
            "trials",
            "-c",
            "rule184",
            "-t",
            "10",
            "-n",
            "41",
            "--density-min",
            "0.3",
            "--density-max",
            "0.7",
            "--log",
            &path_arg,
        ])
        .unwrap();
        assert!(output.contains("Wrote trial log to"));

        let log = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.first().copied(), Some(TRIAL_LOG_HEADER));
        assert_eq!(lines.len(), 11);
        for line in lines.iter().skip(1) {
            let fields: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(fields.len(), 5);
            assert_eq!(fields.first().copied(), Some("rule184"));
            assert_eq!(fields.get(1), fields.get(2));
            assert_eq!(fields.get(3).copied(), Some("0"));
            assert_eq!(fields.get(4).copied(), Some("29"));
        }
    }

    // Tests a sweep log groups records by pair in parameter order
    #[test]
    fn test_execute_sweep_log() {
        let dir = TempDir::new().unwrap();
        let corpus_path = dir.path().join("corpus.txt");
        let log_path = dir.path().join("sweep.txt");
        let corpus_arg = corpus_path.to_string_lossy().to_string();
        let log_arg = log_path.to_string_lossy().to_string();

        execute(&[
            "ringca", "-q", "corpus", "-o", &corpus_arg, "-n", "49", "--densities", "2",
            "--shuffles", "2",
        ])
        .unwrap();
        execute(&[
            "ringca", "-q", "sweep", "-p", "1:3,1:3,2:5", "-f", &corpus_arg, "-b", "120",
            "--log", &log_arg,
        ])
        .unwrap();

        let log = std::fs::read_to_string(&log_path).unwrap();
        let labels: Vec<&str> = log
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(
            labels,
            vec!["1:3", "1:3", "1:3", "1:3", "1:3", "1:3", "1:3", "1:3", "2:5", "2:5", "2:5", "2:5"]
        );
    }

    #[test]
    fn test_describe_classification() {
        let exhausted = RunResult {
            final_density: 0.5,
            steps: 600,
            outcome: Outcome::BudgetExhausted,
        };
        assert_eq!(
            describe_classification(&exhausted, 600),
            "The classifier did not converge within 600 steps (final density 0.5000).\n"
        );
    }

    #[test]
    fn test_history_to_text() {
        let rule = TransitionFunction::elementary(30).unwrap();
        let policy = StoppingPolicy::evolve(1).unwrap();
        let (history, _) = AutomatonEngine::new()
            .run(single_seed(5).unwrap(), &rule, policy)
            .unwrap();
        assert_eq!(history_to_text(&history), ".#...\n###..\n");
    }

    #[test]
    fn test_format_sweep() {
        let reports = vec![
            TrialReport {
                classifier: Classifier::Gkl(MajorityParams::new(1, 3).unwrap()),
                records: Vec::new(),
            },
            TrialReport {
                classifier: Classifier::Rule184,
                records: Vec::new(),
            },
        ];
        assert_eq!(
            format_sweep(&reports),
            "GKL (1, 3): no decided trials, 0 unanswered, mean 0.0 steps\n\
             rule 184: no decided trials, 0 unanswered, mean 0.0 steps\n"
        );
    }
}
