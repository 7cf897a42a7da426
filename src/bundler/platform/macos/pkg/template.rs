//! Templates for the macOS installer inputs.
//!
//! Block tags never stand alone on a line, so the output does not depend on
//! standalone-line whitespace handling.

/// `productbuild` distribution definition.
pub(super) const DISTRIBUTION_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<installer-gui-script minSpecVersion="1">
    <title>{{name}} {{version}}</title>
    <license file="{{license}}" mime-type="application/rtf"/>
    <background file="{{name}}-installer-bg.png" alignment="topleft" scaling="none"/>
{{#each packages}}    <pkg-ref id="{{id}}"/>
{{/each}}    <options require-scripts="false" customize="always" hostArchitectures="{{host_architectures}}"/>
    <choices-outline>
{{#each packages}}        <line choice="{{id}}"/>
{{/each}}    </choices-outline>
{{#each packages}}    <choice id="{{id}}" visible="true" start_selected="true" title="{{title}}"><pkg-ref id="{{id}}"/></choice><pkg-ref id="{{id}}" version="{{version}}" onConclusion="none">{{file}}</pkg-ref>
{{/each}}</installer-gui-script>
"#;

/// Shell script removing installed bundles and package receipts.
pub(super) const UNINSTALL_TEMPLATE: &str = r#"#!/bin/bash

echo "Uninstalling {{product_name}}..."

sudo rm -rf {{app_bundle}}
sudo rm -rf {{vst3_bundle}}
sudo rm -rf {{au_bundle}}

sudo pkgutil --forget {{app_id}}
sudo pkgutil --forget {{vst3_id}}
sudo pkgutil --forget {{au_id}}

echo "Uninstall Finished!"
"#;
