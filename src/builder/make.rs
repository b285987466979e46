//! GNU Make adapter
//!
//! Ties the database parser and the invocation planner together behind the
//! [`BuildTool`] interface, configured from [`Config`].

use super::database::DatabaseParser;
use super::planner::InvocationPlanner;
use super::traits::{BuildFileReport, BuildTool, InvocationPlan, ToolDescriptor};
use crate::config::Config;
use crate::executor::{Invoker, SystemInvoker};

/// Name the tool reports to the host, also never reported as a target
pub const TOOL_NAME: &str = "make";

/// Makefile name make picks up without `--file`
pub const DEFAULT_MAKEFILE: &str = "Makefile";

const MAKE_TOOL: ToolDescriptor = ToolDescriptor {
    name: TOOL_NAME,
    globs: &[DEFAULT_MAKEFILE],
};

/// Static description of the make adapter
pub fn describe() -> ToolDescriptor {
    MAKE_TOOL
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

/// [`BuildTool`] for GNU Make
pub struct MakeTool<I = SystemInvoker> {
    config: Config,
    invoker: I,
}

impl MakeTool<SystemInvoker> {
    /// Create a make adapter that runs the real `make`
    pub fn new(config: Config) -> Self {
        Self::with_invoker(config, SystemInvoker)
    }
}

impl<I: Invoker + Clone> MakeTool<I> {
    /// Create a make adapter that runs commands through `invoker`
    pub fn with_invoker(config: Config, invoker: I) -> Self {
        Self { config, invoker }
    }
}

impl<I: Invoker + Clone> BuildTool for MakeTool<I> {
    fn describe(&self) -> ToolDescriptor {
        describe()
    }

    fn build_info(&self, path: &str) -> BuildFileReport {
        let executable =
            match InvocationPlanner::from_config(&self.config).and_then(|p| p.locate_tool()) {
                Ok(executable) => executable,
                Err(e) => {
                    tracing::warn!("{}", e);
                    return BuildFileReport::failure(&e);
                }
            };

        DatabaseParser::with_invoker(self.invoker.clone())
            .with_program(&self.config.make.program)
            .with_executable(executable)
            .parse(path)
    }

    fn build_command(&self, path: &str, target: &str, flags: &[String]) -> InvocationPlan {
        match InvocationPlanner::from_config(&self.config) {
            Ok(planner) => planner.plan(path, target, flags),
            Err(e) => {
                tracing::warn!("{}", e);
                InvocationPlan::failure(&e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::InvokeOutput;
    use crate::error::BuilderError;
    use std::path::Path;

    /// Answers every invocation with the same canned output
    #[derive(Clone)]
    struct CannedInvoker {
        stdout: &'static str,
    }

    impl Invoker for CannedInvoker {
        fn invoke(
            &self,
            _program: &str,
            _args: &[String],
            _cwd: &Path,
        ) -> Result<InvokeOutput, BuilderError> {
            Ok(InvokeOutput::new(self.stdout, "", 0))
        }
    }

    #[test]
    fn test_describe_is_static() {
        let descriptor = describe();

        assert_eq!(descriptor.name, "make");
        assert_eq!(descriptor.globs, &["Makefile"]);
        assert_eq!(describe(), describe());
    }

    #[test]
    fn test_describe_json() {
        let json = serde_json::to_string(&describe()).unwrap();
        assert_eq!(json, r#"{"name":"make","globs":["Makefile"]}"#);
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_home("~/src/Makefile");
            assert_eq!(
                expanded,
                format!("{}/src/Makefile", home.to_string_lossy())
            );
        }
        assert_eq!(expand_home("/abs/Makefile"), "/abs/Makefile");
        assert_eq!(expand_home("rel/~/Makefile"), "rel/~/Makefile");
    }

    /// Creates a directory holding an executable `name` script with `body`
    #[cfg(unix)]
    fn dir_with_script(name: &str, body: &str) -> tempfile::TempDir {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join(name);
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();
        dir
    }

    fn config_with(program: &str, search_path: &Path) -> Config {
        let mut config = Config::default();
        config.make.program = program.to_string();
        config.make.search_path = Some(search_path.to_string_lossy().to_string());
        config
    }

    #[cfg(unix)]
    #[test]
    fn test_make_tool_build_info() {
        let bin = dir_with_script("make", "exit 0");
        let tool = MakeTool::with_invoker(
            config_with("make", bin.path()),
            CannedInvoker {
                stdout: "# Files\nall: app\n#  Phony target\n",
            },
        );

        let report = tool.build_info("/p/Makefile");
        assert_eq!(report.targets, Some(vec!["all".to_string()]));
    }

    #[cfg(unix)]
    #[test]
    fn test_build_info_runs_program_from_search_path() {
        let bin = dir_with_script(
            "dump-make-xyz",
            "printf '# Files\\nall: app\\n#  Phony target\\n\\nclean:\\n#  Phony target\\n'",
        );
        let project = tempfile::TempDir::new().unwrap();
        let makefile = project.path().join("Makefile");
        std::fs::write(&makefile, "all:\n").unwrap();
        let tool = MakeTool::new(config_with("dump-make-xyz", bin.path()));

        let report = tool.build_info(&makefile.to_string_lossy());

        assert_eq!(report.error, "");
        assert_eq!(
            report.targets,
            Some(vec!["all".to_string(), "clean".to_string()])
        );

        let plan = tool.build_command(&makefile.to_string_lossy(), "all", &[]);
        assert_eq!(
            plan.tool,
            Some(bin.path().join("dump-make-xyz").to_string_lossy().to_string())
        );
    }

    #[test]
    fn test_build_info_program_missing_from_search_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = MakeTool::with_invoker(
            config_with("make", dir.path()),
            CannedInvoker {
                stdout: "# Files\nall: app\n",
            },
        );

        let report = tool.build_info("/p/Makefile");

        assert_eq!(
            report.error,
            format!("Couldn't find 'make' in '{}'", dir.path().display())
        );
        assert!(report.targets.is_none());
        assert!(report.variables.is_none());
    }

    #[test]
    fn test_make_tool_build_command_bad_search_path() {
        let mut config = Config::default();
        config.make.search_path = Some("$MAKE_BUILDER_SURELY_UNSET_67890".to_string());
        let tool = MakeTool::with_invoker(config, CannedInvoker { stdout: "" });

        let plan = tool.build_command("/p/Makefile", "all", &[]);

        assert!(plan.error.starts_with("Configuration error"));
        assert!(plan.args.is_none());
    }

    #[test]
    fn test_make_tool_build_command_missing_tool() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.make.search_path = Some(dir.path().to_string_lossy().to_string());
        let tool = MakeTool::with_invoker(config, CannedInvoker { stdout: "" });

        let plan = tool.build_command("/p/Makefile", "all", &[]);

        assert_eq!(
            plan.error,
            format!("Couldn't find 'make' in '{}'", dir.path().display())
        );
    }
}
