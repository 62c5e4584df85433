use assert_cmd::prelude::*;
use predicates::prelude::*;

/// Full pipe: pricing + events in, one verdict line per agent out, agents in
/// lexicographic order.
#[test]
fn cli_audit_prints_sorted_verdicts() -> anyhow::Result<()> {
    let input = "\
1
1 5
suv 1000 50 2
1 x p suv
5 x a 10
10 x r 100
1 y p suv
2 y p suv
";

    let mut cmd = assert_cmd::Command::cargo_bin("rdk-cli")?;
    cmd.arg("audit").write_stdin(input);

    cmd.assert()
        .success()
        .stdout(predicate::eq("x 350\ny INCONSISTENT\n"));
    Ok(())
}

#[test]
fn cli_audit_reads_unsorted_timestamps() -> anyhow::Result<()> {
    // Same ledger as above for agent x, scrambled input order.
    let input = "\
1
1 3
suv 1000 50 2
10 x r 100
1 x p suv
5 x a 10
";

    let mut cmd = assert_cmd::Command::cargo_bin("rdk-cli")?;
    cmd.arg("audit").write_stdin(input);

    cmd.assert().success().stdout(predicate::eq("x 350\n"));
    Ok(())
}

#[test]
fn cli_audit_unknown_car_is_inconsistent_not_fatal() -> anyhow::Result<()> {
    let input = "\
1
0 2
1 x p ghost
2 x r 5
";

    let mut cmd = assert_cmd::Command::cargo_bin("rdk-cli")?;
    cmd.arg("audit").write_stdin(input);

    cmd.assert()
        .success()
        .stdout(predicate::eq("x INCONSISTENT\n"));
    Ok(())
}
