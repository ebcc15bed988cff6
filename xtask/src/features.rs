//! Feature matrix for the SDK crates

use anyhow::Result;

/// `test-utils` must stay optional: the crates build with and without it
const FEATURE_MATRIX: &[(&str, Option<&str>)] = &[
    ("placetopay-domain", None),
    ("placetopay-common", None),
    ("placetopay-common", Some("test-utils")),
    ("placetopay-infra", None),
    ("placetopay-infra", Some("test-utils")),
];

/// `cargo check` every package/feature pair, stopping at the first failure
pub fn test_feature_matrix() -> Result<()> {
    for &(package, feature) in FEATURE_MATRIX {
        println!("--> {package} [{}]", feature.unwrap_or("default"));

        let mut args = vec!["check", "-p", package];
        if let Some(feature) = feature {
            args.extend(["--features", feature]);
        }
        crate::cargo(&args)?;
    }

    println!("{} combinations compile", FEATURE_MATRIX.len());
    Ok(())
}
