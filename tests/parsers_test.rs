use gitchain::commands::basic::{parse_config_list, parse_init, parse_tags};
use gitchain::commands::branch::parse_branches;
use gitchain::commands::commit::parse_commit;
use gitchain::commands::log::parse_log;
use gitchain::commands::status::parse_status;
use gitchain::commands::version::parse_version;
use gitchain::GitCommand;

#[test]
fn test_parse_version_variants() {
    let plain = parse_version("git version 2.43.0\n").unwrap();
    assert_eq!((plain.major, plain.minor, plain.patch), (2, 43, 0));
    assert_eq!(plain.agent, "");

    let windows = parse_version("git version 2.37.1.windows.1").unwrap();
    assert_eq!(windows.patch, 1);
    assert_eq!(windows.agent, "windows.1");

    let apple = parse_version("git version 2.39.3 (Apple Git-146)").unwrap();
    assert_eq!(apple.minor, 39);
    assert_eq!(apple.agent, "(Apple Git-146)");
    assert!(apple.at_least(2, 30));
    assert!(!apple.at_least(3, 0));

    assert!(parse_version("hello").is_err());
}

#[test]
fn test_parse_status_tracking_and_files() {
    let text = "## main...origin/main [ahead 2, behind 1]\n\
                M  staged.rs\n \
                M unstaged.rs\n\
                A  added.rs\n\
                R  old.rs -> new.rs\n\
                UU conflict.rs\n\
                ?? untracked.txt\n\
                !! ignored.log\n";
    let status = parse_status(text).unwrap();

    assert_eq!(status.current.as_deref(), Some("main"));
    assert_eq!(status.tracking.as_deref(), Some("origin/main"));
    assert_eq!((status.ahead, status.behind), (2, 1));
    assert!(!status.detached);

    assert_eq!(status.files.len(), 6);
    assert_eq!(status.modified, vec!["staged.rs", "unstaged.rs"]);
    assert_eq!(status.created, vec!["added.rs"]);
    assert_eq!(status.renamed, vec![("old.rs".to_string(), "new.rs".to_string())]);
    assert_eq!(status.conflicted, vec!["conflict.rs"]);
    assert_eq!(status.not_added, vec!["untracked.txt"]);
    assert_eq!(status.staged, vec!["staged.rs", "added.rs", "new.rs"]);

    let renamed = status.files.iter().find(|f| f.path == "new.rs").unwrap();
    assert_eq!(renamed.from.as_deref(), Some("old.rs"));
    assert!(!status.is_clean());
}

#[test]
fn test_parse_status_branch_headers() {
    let fresh = parse_status("## No commits yet on trunk\n").unwrap();
    assert_eq!(fresh.current.as_deref(), Some("trunk"));
    assert!(fresh.is_clean());

    let detached = parse_status("## HEAD (no branch)\n").unwrap();
    assert!(detached.detached);

    let local = parse_status("## feature/x\n").unwrap();
    assert_eq!(local.current.as_deref(), Some("feature/x"));
    assert_eq!(local.tracking, None);

    assert!(parse_status("X\n").is_err());
}

#[test]
fn test_parse_branches() {
    let text = "  feature  1111111111111111111111111111111111111111 Add feature\n\
                * main     2222222222222222222222222222222222222222 Initial commit\n";
    let branches = parse_branches(text).unwrap();
    assert_eq!(branches.current.as_deref(), Some("main"));
    assert_eq!(branches.all, vec!["feature", "main"]);
    assert_eq!(branches.branches[0].label, "Add feature");
    assert_eq!(branches.branches[1].commit, "2222222222222222222222222222222222222222");
    assert!(!branches.detached);

    let detached = parse_branches("* (HEAD detached at 2222222) 2222222222222222222222222222222222222222 msg\n").unwrap();
    assert!(detached.detached);
    assert_eq!(detached.current.as_deref(), Some("(HEAD detached at 2222222)"));
    assert_eq!(detached.branches[0].label, "msg");
}

#[test]
fn test_parse_commit() {
    let text = "[main (root-commit) 1a2b3c4] initial\n 2 files changed, 5 insertions(+), 1 deletion(-)\n create mode 100644 a.txt\n";
    let commit = parse_commit(text).unwrap();
    assert_eq!(commit.branch, "main");
    assert_eq!(commit.commit, "1a2b3c4");
    assert!(commit.root);
    assert_eq!((commit.changes, commit.insertions, commit.deletions), (2, 5, 1));

    let detached = parse_commit("[detached HEAD 9f8e7d6] fix\n 1 file changed, 1 insertion(+)\n").unwrap();
    assert_eq!(detached.branch, "detached HEAD");
    assert!(!detached.root);
    assert_eq!(detached.deletions, 0);

    assert!(parse_commit("nothing to commit").is_err());
}

#[test]
fn test_parse_log() {
    let text = "abc\x1f2024-01-02T03:04:05+00:00\x1ffirst\x1fAda\x1fada@example.com\x1e\n\
                def\x1f2024-01-01T00:00:00+00:00\x1fsecond\x1fBob\x1fbob@example.com\x1e";
    let entries = parse_log(text).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].hash, "abc");
    assert_eq!(entries[0].author_email, "ada@example.com");
    assert_eq!(entries[1].message, "second");

    assert!(parse_log("").unwrap().is_empty());
    assert!(parse_log("only\x1ftwo\x1e").is_err());
}

#[test]
fn test_parse_small_outputs() {
    let init = parse_init(false, "Initialized empty Git repository in /tmp/repo/.git/\n");
    assert!(!init.existing);
    assert_eq!(init.git_dir.as_deref(), Some("/tmp/repo/.git/"));

    let again = parse_init(false, "Reinitialized existing Git repository in /tmp/repo/.git/\n");
    assert!(again.existing);

    let tags = parse_tags("v1.0.0\nv1.2.0\nv1.10.0\n");
    assert_eq!(tags.all.len(), 3);
    assert_eq!(tags.latest.as_deref(), Some("v1.10.0"));
    assert_eq!(parse_tags("").latest, None);

    let config = parse_config_list("user.name=Ada\ncore.bare=false\nbroken\n");
    assert_eq!(config, vec![
        ("user.name".to_string(), "Ada".to_string()),
        ("core.bare".to_string(), "false".to_string()),
    ]);
}

#[test]
fn test_command_display() {
    let command = GitCommand::new("commit").args(["-m", "hello"]);
    assert_eq!(command.to_string(), "git commit -m hello");
    assert_eq!(command.subcommand(), Some("commit"));
}
