// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::helpers::*;
use crate::ConvertArgs;
use anyhow::Result;
use ph_devtools::assets::AssetConverter;
use ph_devtools::{DevToolsConfig, SdkRoot, SystemRunner};

pub fn convert(root: &SdkRoot, config: &DevToolsConfig, args: &ConvertArgs) -> Result<()> {
    print_task_start("Converting Assets", BRUSH, MAGENTA);

    // Fails here, before any file is processed, when toktx is missing.
    let converter = AssetConverter::from_config(
        root,
        &config.assets,
        args.source.as_deref(),
        args.dest.as_deref(),
    )?;
    print_info(&format!(
        "{} -> {}",
        converter.source_dir().display(),
        converter.dest_dir().display()
    ));

    let report = run_task("Asset conversion", || {
        Ok(converter.run(&mut SystemRunner::new())?)
    })?;

    println!(
        "{}🔎 Summary:{} {} transcoded, {} glTF rewritten, {} copied, {} ignored.",
        BOLD, RESET, report.transcoded, report.rewritten, report.copied, report.ignored
    );
    Ok(())
}
