//! Built-in template sources.
//!
//! `info-plist` is XML and relies on the registry's HTML escaping. The
//! manifest uses triple-stash to emit values verbatim. The launch script
//! passes every value through `shell_quote`.

/// Bundle descriptor, `Contents/Info.plist`.
pub const INFO_PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleDevelopmentRegion</key>
	<string>English</string>
	<key>CFBundleExecutable</key>
	<string>{{name}}</string>
	<key>CFBundleInfoDictionaryVersion</key>
	<string>6.0</string>
	<key>CFBundleName</key>
	<string>{{name}}</string>
	<key>CFBundlePackageType</key>
	<string>APPL</string>
	<key>CFBundleShortVersionString</key>
	<string>{{version}}</string>
	<key>CFBundleVersion</key>
	<string>{{version}}</string>
	<key>NSExecutable</key>
	<string>{{name}}</string>
	<key>NSJavaNeeded</key>
	<true/>
	<key>NSJavaPath</key>
	<array>
{{#each java_path}}
		<string>{{this}}</string>
{{/each}}
	</array>
	<key>NSJavaRoot</key>
	<string>{{java_root}}</string>
	<key>NSPrincipalClass</key>
	<string>{{main_class}}</string>
</dict>
</plist>
"#;

/// Per-platform classpath manifest, one entry per line.
pub const CLASSPATH_TEMPLATE: &str = "{{#each classpath}}{{{this}}}\n{{/each}}";

/// POSIX launch script at the bundle root.
pub const LAUNCH_SCRIPT_TEMPLATE: &str = r#"#!/bin/sh
# Launches the application from its bundle directory.
APPROOT=$(cd "$(dirname "$0")" && pwd -P)
CLASSPATH=""
for entry in \
{{#each classpath}}
	{{{shell_quote this}}} \
{{/each}}
	; do
	CLASSPATH="${CLASSPATH:+$CLASSPATH:}$APPROOT/$entry"
done
cd "$APPROOT" || exit 1
exec "${JAVA:-java}" $JAVA_OPTS -cp "$CLASSPATH" {{{shell_quote main_class}}} "$@"
"#;
