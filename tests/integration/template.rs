use anyhow::Result;
use docprep_cli::core::DocprepError;
use docprep_cli::resolver::LocalRepository;
use docprep_cli::template::{TemplateProvisioner, TemplateState, ZipExtractor};
use docprep_cli::test_utils::RecordingRunner;
use docprep_cli::utils::HostPlatform;
use docprep_cli::version::GeneratorVersion;

use crate::common::Workbench;

fn version(s: &str) -> GeneratorVersion {
    s.parse().expect("valid generator version")
}

#[test]
fn test_legacy_bundle_gets_helper_fixed_on_linux() -> Result<()> {
    let bench = Workbench::new()?;
    bench.install_bundle("4.0.0.2000")?;
    let repository = LocalRepository::new(bench.repo.context());
    let runner = RecordingRunner::succeeding();
    let provisioner = TemplateProvisioner::new(&repository, &ZipExtractor, &runner);

    let out = bench.path().join("templates");
    let provisioned = provisioner.provision(&version("4.0.0.2000"), &out, HostPlatform::Linux)?;

    assert_eq!(provisioned.state, TemplateState::PermissionFixed);
    assert_eq!(provisioned.path, out.canonicalize()?);
    assert!(out.join("index.html").is_file());
    assert!(out.join("images/logo.png").is_file());

    let helper = provisioned.path.join("asDocHelper.linux");
    assert_eq!(runner.command_lines(), vec![format!("chmod u+x {}", helper.display())]);
    Ok(())
}

#[test]
fn test_last_legacy_release_is_fixed_on_other_unix() -> Result<()> {
    let bench = Workbench::new()?;
    bench.install_bundle("4.0.0.3127")?;
    let repository = LocalRepository::new(bench.repo.context());
    let runner = RecordingRunner::succeeding();
    let provisioner = TemplateProvisioner::new(&repository, &ZipExtractor, &runner);

    let provisioned =
        provisioner.provision(&version("4.0.0.3127"), &bench.path().join("t"), HostPlatform::Other)?;

    assert_eq!(provisioned.state, TemplateState::PermissionFixed);
    let lines = runner.command_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("asDocHelper"), "no .linux suffix off Linux: {}", lines[0]);
    Ok(())
}

#[test]
fn test_newer_bundle_and_windows_skip_fix() -> Result<()> {
    let bench = Workbench::new()?;
    bench.install_bundle("4.0.0.3128")?;
    bench.install_bundle("4.0.0.2000")?;
    let repository = LocalRepository::new(bench.repo.context());
    let runner = RecordingRunner::succeeding();
    let provisioner = TemplateProvisioner::new(&repository, &ZipExtractor, &runner);

    let newer = provisioner.provision(&version("4.0.0.3128"), &bench.path().join("a"), HostPlatform::Linux)?;
    let windows =
        provisioner.provision(&version("4.0.0.2000"), &bench.path().join("b"), HostPlatform::Windows)?;

    assert_eq!(newer.state, TemplateState::PermissionFixSkipped);
    assert_eq!(windows.state, TemplateState::PermissionFixSkipped);
    assert!(runner.command_lines().is_empty());
    Ok(())
}

#[test]
fn test_provisioning_twice_reapplies_fix() -> Result<()> {
    let bench = Workbench::new()?;
    bench.install_bundle("4.0.0.2000")?;
    let repository = LocalRepository::new(bench.repo.context());
    let runner = RecordingRunner::succeeding();
    let provisioner = TemplateProvisioner::new(&repository, &ZipExtractor, &runner);
    let out = bench.path().join("templates");

    let first = provisioner.provision(&version("4.0.0.2000"), &out, HostPlatform::Linux)?;
    std::fs::write(out.join("index.html"), "stale")?;
    let second = provisioner.provision(&version("4.0.0.2000"), &out, HostPlatform::Linux)?;

    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(out.join("index.html"))?, "<html/>");
    assert_eq!(runner.command_lines().len(), 2);
    Ok(())
}

#[test]
fn test_chmod_that_cannot_launch_fails_provisioning() -> Result<()> {
    let bench = Workbench::new()?;
    bench.install_bundle("4.0.0.2000")?;
    let repository = LocalRepository::new(bench.repo.context());
    let runner = RecordingRunner::failing_to_spawn();
    let provisioner = TemplateProvisioner::new(&repository, &ZipExtractor, &runner);

    let err = provisioner
        .provision(&version("4.0.0.2000"), &bench.path().join("t"), HostPlatform::Linux)
        .unwrap_err();

    assert!(
        matches!(err, DocprepError::ExternalProcessError { exit_code: None, .. }),
        "unexpected error {err:?}"
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_real_chmod_sets_owner_execute() -> Result<()> {
    use docprep_cli::process::SystemProcessRunner;
    use std::os::unix::fs::PermissionsExt;

    let bench = Workbench::new()?;
    bench.install_bundle("4.0.0.2000")?;
    let repository = LocalRepository::new(bench.repo.context());
    let provisioner = TemplateProvisioner::new(&repository, &ZipExtractor, &SystemProcessRunner);

    let platform = HostPlatform::detect();
    let provisioned = provisioner.provision(&version("4.0.0.2000"), &bench.path().join("t"), platform)?;

    let helper = docprep_cli::template::helper_path(&provisioned.path, platform);
    let mode = std::fs::metadata(&helper)?.permissions().mode();
    assert_eq!(mode & 0o100, 0o100, "owner execute bit set on {}", helper.display());
    Ok(())
}
