//! Generation of solution and project configuration/platform sections content

use itertools::iproduct;

use crate::api::{Configuration, Layout, Mapping, Tag};

pub const SOLUTION_CONFIGURATION_PLATFORMS: &str = "SolutionConfigurationPlatforms";
pub const PROJECT_CONFIGURATION_PLATFORMS: &str = "ProjectConfigurationPlatforms";
pub const PRE_SOLUTION: &str = "preSolution";
pub const POST_SOLUTION: &str = "postSolution";

/// Lines of `SolutionConfigurationPlatforms` section.
/// Each configuration maps unified platform to itself, e.g. `Debug|Mixed Platforms = Debug|Mixed Platforms`
#[must_use]
pub fn solution_platforms(layout: Layout) -> Vec<String> {
    let label = layout.label();
    Configuration::ALL
        .iter()
        .map(|c| format!("{c}|{label} = {c}|{label}"))
        .collect()
}

/// Lines of `ProjectConfigurationPlatforms` section.
/// Four lines per project (`ActiveCfg` and `Build.0` for Debug and Release) in projects order
#[must_use]
pub fn project_platforms(layout: Layout, mappings: &[Mapping<'_>]) -> Vec<String> {
    let label = layout.label();
    mappings
        .iter()
        .flat_map(|m| {
            iproduct!(Configuration::ALL, Tag::ALL).map(move |(c, t)| {
                format!(
                    "{}.{c}|{label}.{t} = {c}|{}",
                    m.project.id, m.platform
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Project;
    use rstest::rstest;

    #[rstest]
    #[case(Layout::MixedPlatforms, vec!["Debug|Mixed Platforms = Debug|Mixed Platforms", "Release|Mixed Platforms = Release|Mixed Platforms"])]
    #[case(Layout::WinAll, vec!["Debug|WINALL = Debug|WINALL", "Release|WINALL = Release|WINALL"])]
    #[trace]
    fn solution_platforms_tests(#[case] layout: Layout, #[case] expected: Vec<&str>) {
        // Act
        let actual = solution_platforms(layout);

        // Assert
        assert_eq!(actual, expected);
    }

    #[test]
    fn project_platforms_x64_and_win32() {
        // Arrange
        let mappings = vec![
            Mapping::new(Project {
                name: "Foo_x64",
                file: "Foo_x64",
                id: "{11111111-1111-1111-1111-111111111111}",
            }),
            Mapping::new(Project {
                name: "Bar",
                file: "Bar",
                id: "{22222222-2222-2222-2222-222222222222}",
            }),
        ];

        // Act
        let actual = project_platforms(Layout::MixedPlatforms, &mappings);

        // Assert
        assert_eq!(
            actual,
            vec![
                "{11111111-1111-1111-1111-111111111111}.Debug|Mixed Platforms.ActiveCfg = Debug|x64",
                "{11111111-1111-1111-1111-111111111111}.Debug|Mixed Platforms.Build.0 = Debug|x64",
                "{11111111-1111-1111-1111-111111111111}.Release|Mixed Platforms.ActiveCfg = Release|x64",
                "{11111111-1111-1111-1111-111111111111}.Release|Mixed Platforms.Build.0 = Release|x64",
                "{22222222-2222-2222-2222-222222222222}.Debug|Mixed Platforms.ActiveCfg = Debug|WIN32",
                "{22222222-2222-2222-2222-222222222222}.Debug|Mixed Platforms.Build.0 = Debug|WIN32",
                "{22222222-2222-2222-2222-222222222222}.Release|Mixed Platforms.ActiveCfg = Release|WIN32",
                "{22222222-2222-2222-2222-222222222222}.Release|Mixed Platforms.Build.0 = Release|WIN32",
            ]
        );
    }

    #[test]
    fn project_platforms_no_projects() {
        // Act
        let actual = project_platforms(Layout::WinAll, &[]);

        // Assert
        assert!(actual.is_empty());
    }

    #[test]
    fn project_platforms_duplicate_ids_kept() {
        // Arrange
        let p = Project {
            name: "a",
            file: "a",
            id: "{A}",
        };
        let mappings = vec![Mapping::new(p.clone()), Mapping::new(p)];

        // Act
        let actual = project_platforms(Layout::WinAll, &mappings);

        // Assert
        assert_eq!(actual.len(), 8);
        assert_eq!(actual[0], "{A}.Debug|WINALL.ActiveCfg = Debug|WIN32");
        assert_eq!(actual[4], actual[0]);
    }
}
