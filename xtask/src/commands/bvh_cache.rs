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
use anyhow::Result;
use ph_devtools::bvh_cache::{CacheRegenerator, CACHE_RUNS};
use ph_devtools::{DevToolsConfig, SdkRoot, SystemRunner};

pub fn regen(root: &SdkRoot, config: &DevToolsConfig) -> Result<()> {
    print_task_start("Regenerating BVH Caches", TREE, GREEN);
    print_info(&format!(
        "Looking for samples under '{}'",
        root.resolve(&config.bvh_cache.binary_template).display()
    ));

    let regen = CacheRegenerator::new(root.clone(), config.bvh_cache.clone());
    let report = run_task("BVH cache regeneration", || {
        Ok(regen.run(&mut SystemRunner::new(), CACHE_RUNS))
    })?;

    println!(
        "{}🔎 Summary:{} {} succeeded, {} failed, {} skipped (no binary).",
        BOLD, RESET, report.succeeded, report.failed, report.skipped
    );
    if report.failed > 0 {
        print_warning("Some samples failed; their caches were not refreshed.");
    }
    Ok(())
}
