// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Small source edits for JVM-language files.

use std::sync::LazyLock;

use regex::Regex;

static PACKAGE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^package .*;?$").expect("invalid package regex"));

/// Add `import` lines for every name in `imports` that `source` does not
/// already mention.
///
/// Imports go on the line after the `package` declaration, or at the top of
/// the file when there is none. `semicolons` selects Java-style `import x;`
/// over Kotlin-style `import x`.
pub fn add_imports(source: &str, imports: &[&str], semicolons: bool) -> String {
    let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();
    let insert_at = lines
        .iter()
        .position(|line| PACKAGE_DECLARATION.is_match(line))
        .map_or(0, |index| index + 1);

    for import in imports {
        if !source.contains(import) {
            let terminator = if semicolons { ";" } else { "" };
            lines.insert(insert_at, format!("import {import}{terminator}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kotlin_import_has_no_semicolon() {
        let src = "package com.demo\n\nimport android.app.Application\n";
        let out = add_imports(src, &["com.appzung.codepush.react.CodePush"], false);
        assert_eq!(
            out,
            "package com.demo\nimport com.appzung.codepush.react.CodePush\n\nimport android.app.Application\n"
        );
    }

    #[test]
    fn java_import_has_semicolon() {
        let src = "package com.demo;\n";
        let out = add_imports(src, &["com.appzung.codepush.react.CodePush"], true);
        assert_eq!(out, "package com.demo;\nimport com.appzung.codepush.react.CodePush;\n");
    }

    #[test]
    fn existing_import_is_left_alone() {
        let src = "package com.demo\nimport com.appzung.codepush.react.CodePush\n";
        assert_eq!(add_imports(src, &["com.appzung.codepush.react.CodePush"], false), src);
    }

    #[test]
    fn no_package_inserts_at_top() {
        let out = add_imports("class A", &["x.Y"], false);
        assert_eq!(out, "import x.Y\nclass A");
    }
}
