use msw::{Discovery, HeaderDeployInfo};
use msw_test::TestContext;
use pretty_assertions::assert_eq;

use crate::common::{ScriptedSystem, sorted};

fn sorted_groups(info: &HeaderDeployInfo) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<_> = info
        .iter()
        .map(|(directory, files)| (directory.to_string(), sorted(files.to_vec())))
        .collect();
    groups.sort();
    groups
}

#[test]
fn headers_are_grouped_by_containing_directory() -> anyhow::Result<()> {
    let context = TestContext::with_files([
        "os/thread/Thread.h",
        "os/thread/Mutex.h",
        "os/thread/Thread.cpp",
        "io/File.h",
        "docs/index.txt",
    ]);
    let system = context.system();

    let info = Discovery::new(&system).header_deploy_info()?;

    assert_eq!(
        sorted_groups(&info),
        vec![
            ("./io".to_string(), vec!["File.h".to_string()]),
            (
                "./os/thread".to_string(),
                vec!["Mutex.h".to_string(), "Thread.h".to_string()]
            ),
        ]
    );
    assert!(!info.contains_directory("./os"));
    assert!(!info.contains_directory("./docs"));

    Ok(())
}

#[test]
fn headers_keep_discovery_order() -> anyhow::Result<()> {
    let system = ScriptedSystem::new(
        "/work/proj",
        ["os/thread/Thread.h", "io/File.h", "os/thread/Mutex.h"],
    );

    let info = Discovery::new(&system).header_deploy_info()?;

    assert_eq!(
        info.get("./os/thread"),
        Some(["Thread.h".to_string(), "Mutex.h".to_string()].as_slice())
    );
    assert_eq!(info.get("./io"), Some(["File.h".to_string()].as_slice()));
    insta::assert_snapshot!(
        serde_json::to_string(&info)?,
        @r#"{"./os/thread":["Thread.h","Mutex.h"],"./io":["File.h"]}"#
    );

    Ok(())
}

#[test]
fn each_level_is_its_own_group() -> anyhow::Result<()> {
    let context = TestContext::with_files(["version.h", "alf/Log.h", "alf/detail/Impl.h"]);
    let system = context.system();

    let info = Discovery::new(&system).header_deploy_info()?;

    assert_eq!(
        sorted_groups(&info),
        vec![
            (".".to_string(), vec!["version.h".to_string()]),
            ("./alf".to_string(), vec!["Log.h".to_string()]),
            ("./alf/detail".to_string(), vec!["Impl.h".to_string()]),
        ]
    );
    assert_eq!(info.file_count(), 3);

    Ok(())
}

#[test]
fn no_headers() -> anyhow::Result<()> {
    let context = TestContext::with_files(["main.cpp", "include/README"]);
    let system = context.system();

    let info = Discovery::new(&system).header_deploy_info()?;

    assert!(info.is_empty());

    Ok(())
}

#[test]
fn repeated_calls_agree() -> anyhow::Result<()> {
    let context = TestContext::with_files(["a/x.h", "a/y.h", "b/z.h"]);
    let system = context.system();
    let discovery = Discovery::new(&system);

    assert_eq!(
        discovery.header_deploy_info()?,
        discovery.header_deploy_info()?
    );

    Ok(())
}
