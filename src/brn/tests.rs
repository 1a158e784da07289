#[cfg(test)]
mod test {
    use crate::brn::run_with_clock;
    use crate::brn::token::FixedClock;
    use crate::brn::Cli;
    use crate::brn::RenameError;
    use crate::brn::Speaker;
    use crate::brn::Verbosity;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    macro_rules! t {
        ($t:ident : $s1:expr => $s2:expr) => {
            #[test]
            fn $t() {
                assert_eq!($s1, $s2)
            }
        };
    }

    fn clock() -> FixedClock {
        let moment = NaiveDate::from_ymd_opt(2021, 11, 30)
            .and_then(|date| date.and_hms_opt(8, 0, 59))
            .unwrap();
        FixedClock(moment)
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_from_args(std::iter::once("brn").chain(args.iter().copied())).unwrap()
    }

    fn touch(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, name).unwrap();
        path.to_str().unwrap().to_string()
    }

    //-------------------------------------------------------------------------
    // Verbosity
    t!(verbosity_default: Verbosity::new(false, 0) => Verbosity::Low);
    t!(verbosity_one: Verbosity::new(false, 1) => Verbosity::Medium);
    t!(verbosity_two: Verbosity::new(false, 2) => Verbosity::High);
    t!(verbosity_many: Verbosity::new(false, 7) => Verbosity::Debug);
    t!(verbosity_silent: Verbosity::new(true, 3) => Verbosity::Silent);

    //-------------------------------------------------------------------------
    // Error messages
    t!(message_missing_file:
        RenameError::MissingFileName.to_string() => "Please specify a file name.");
    t!(message_invalid_parameters:
        RenameError::InvalidParameters("prefix requires at least one parameter".to_string()).to_string()
        => "Invalid parameters: prefix requires at least one parameter.");
    t!(message_unknown_option:
        RenameError::UnknownOption("-zzz".to_string()).to_string()
        => "Invalid option: -zzz is an invalid option. Run with -help to view available options.");
    t!(message_rename:
        RenameError::Rename("a.txt".to_string()).to_string() => "Error renaming file: a.txt");

    //-------------------------------------------------------------------------
    // Command line
    #[test]
    fn cli_keeps_single_dash_options() {
        let cli = cli(&["-file", "a.txt", "-prefix", "X", "-help"]);
        assert_eq!(cli.args, vec!["-file", "a.txt", "-prefix", "X", "-help"]);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbosity(), Verbosity::Low);
    }

    #[test]
    fn cli_flags_before_options() {
        let cli = cli(&["--dry-run", "--verbose", "--verbose", "-file", "a"]);
        assert!(cli.dry_run);
        assert_eq!(cli.verbosity(), Verbosity::High);
        assert_eq!(cli.args, vec!["-file", "a"]);
    }

    #[test]
    fn cli_flags_after_options_are_options() {
        let cli = cli(&["--silent", "-file", "a", "--dry-run"]);
        assert!(!cli.dry_run);
        assert_eq!(cli.verbosity(), Verbosity::Silent);
        assert_eq!(cli.args, vec!["-file", "a", "--dry-run"]);
    }

    #[test]
    fn cli_without_options() {
        let cli = cli(&[]);
        assert!(cli.args.is_empty());
    }

    #[test]
    fn cli_keeps_leading_separator() {
        let cli = cli(&["--", "-file", "a", "-prefix", "X"]);
        assert_eq!(cli.args, vec!["--", "-file", "a", "-prefix", "X"]);
        let cli = self::cli(&["--silent", "--dry-run", "--", "-file", "a"]);
        assert!(cli.dry_run);
        assert_eq!(cli.args, vec!["--", "-file", "a"]);
    }

    #[test]
    fn cli_separator_after_options_is_kept_once() {
        let cli = cli(&["-file", "a", "--", "b"]);
        assert_eq!(cli.args, vec!["-file", "a", "--", "b"]);
    }

    //-------------------------------------------------------------------------
    // Runs
    #[test]
    fn run_help_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.txt");
        let result = run_with_clock(&cli(&["-file", &a, "-suffix", "x", "-help"]), &clock());
        assert_eq!(result, Ok(()));
        assert!(Path::new(&a).exists());
    }

    #[test]
    fn run_suffix_with_tokens() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.txt");
        let b = touch(&dir, "b.txt");
        let cli = cli(&["--silent", "-file", &a, &b, "-suffix", "_", "@date", "_", "@time"]);

        assert_eq!(run_with_clock(&cli, &clock()), Ok(()));

        assert!(Path::new(&format!("{a}_30-11-2021_08-00-59")).exists());
        assert!(Path::new(&format!("{b}_30-11-2021_08-00-59")).exists());
        assert!(!Path::new(&a).exists());
    }

    #[test]
    fn run_chained_operations() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "foo_bar_baz.txt");
        let cli = cli(&["--silent", "-file", &a, "-replace", "_", "-", "-suffix", ".bak"]);

        assert_eq!(run_with_clock(&cli, &clock()), Ok(()));

        let expected = dir.path().join("foo-bar-baz.txt.bak");
        assert!(expected.exists());
        assert_eq!(fs::read_to_string(expected).unwrap(), "foo_bar_baz.txt");
    }

    #[test]
    fn run_validates_everything_first() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.txt");
        let cli = cli(&["--silent", "-file", &a, "-suffix", "x", "-zzz"]);

        assert_eq!(
            run_with_clock(&cli, &clock()),
            Err(RenameError::UnknownOption("-zzz".to_string()))
        );
        assert!(Path::new(&a).exists());
    }

    #[test]
    fn run_rejects_leading_separator() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.txt");
        let cli = cli(&["--silent", "--", "-file", &a, "-prefix", "X"]);

        assert_eq!(
            run_with_clock(&cli, &clock()),
            Err(RenameError::UnknownOption("--".to_string()))
        );
        assert!(Path::new(&a).exists());
    }

    #[cfg(unix)]
    #[test]
    fn run_rejects_non_unicode_names() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let cli = Cli::try_from_args([
            OsString::from("brn"),
            OsString::from("-file"),
            OsString::from_vec(vec![b'a', 0xff]),
            OsString::from("-prefix"),
            OsString::from("X"),
        ])
        .unwrap();

        assert_eq!(
            run_with_clock(&cli, &clock()),
            Err(RenameError::InvalidParameters(
                "a\u{FFFD} is not valid UTF-8".to_string()
            ))
        );
    }

    #[test]
    fn run_missing_file() {
        let cli = cli(&["-prefix", "X"]);
        assert_eq!(
            run_with_clock(&cli, &clock()),
            Err(RenameError::MissingFileName)
        );
    }

    #[test]
    fn run_dry_run() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.txt");
        let cli = cli(&["--dry-run", "--silent", "-file", &a, "-suffix", ".old"]);

        assert_eq!(run_with_clock(&cli, &clock()), Ok(()));
        assert!(Path::new(&a).exists());
        assert!(!Path::new(&format!("{a}.old")).exists());
    }

    #[test]
    fn run_partial_failure_keeps_earlier_renames() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.txt");
        let b = touch(&dir, "b.txt");
        let c = touch(&dir, "c.txt");
        // b.txt.old is in the way of the second rename.
        touch(&dir, "b.txt.old");
        let cli = cli(&["--silent", "-file", &a, &b, &c, "-suffix", ".old"]);

        assert_eq!(
            run_with_clock(&cli, &clock()),
            Err(RenameError::Rename(b.clone()))
        );
        assert!(Path::new(&format!("{a}.old")).exists());
        assert!(Path::new(&b).exists());
        assert!(Path::new(&c).exists());
        assert_eq!(fs::read_to_string(format!("{b}.old")).unwrap(), "b.txt.old");
    }
}
