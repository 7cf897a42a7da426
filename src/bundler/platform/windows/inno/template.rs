//! Inno Setup script template.
//!
//! Single braces (`{app}`, `{group}`, `{autopf64}`) are Inno Setup constants
//! and pass through handlebars untouched. Values that would follow a
//! backslash are assembled in Rust, since `\{{` is an escaped expression.

pub(super) const ISS_TEMPLATE: &str = r#"[Setup]
AppName={{product_name}}
AppPublisher={{publisher}}
OutputBaseFilename={{installer_name}}-setup
AppVersion={{version}}
AppId={{app_id}}
WizardStyle=modern
Compression=lzma2
SolidCompression=yes
SetupLogging=yes
DefaultDirName={{default_dir}}
DefaultGroupName={{product_name}}
OutputDir={{output_dir}}
WizardSmallImageFile={{small_image}}
WizardImageFile={{wizard_image}}
LicenseFile={{license_file}}


[Types]
Name: "full"; Description: "Full installation"
Name: "custom"; Description: "Custom installation"; Flags: iscustom

[Components]
Name: "VST3"; Description: "VST3"; Types: full custom; Flags: fixed
Name: "Standalone"; Description: "Standalone"; Types: full;

[Files]
Source: "{{standalone_source}}"; DestDir: "{app}"; Components: Standalone
Source: "{{vst3_source}}"; DestDir: "{autopf64}\Common Files\VST3"; Components: VST3

[Icons]
Name: "{{program_icon}}"; Filename: "{{program_exe}}"; Components: Standalone
Name: "{{uninstall_icon}}"; Filename: "{app}\unins000.exe"
"#;
