// Copyright 2026 navstore Project Authors
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


use std::sync::Arc;

use navstore::{InMemoryHistory, NavigationCacheBuilder, NavigationCacheConfig, PrometheusMetricsRegistry};
use prometheus::{Encoder, Registry, TextEncoder};

fn main() {
    let config: NavigationCacheConfig = serde_json::from_str(r#"{ "capacity": 8 }"#).unwrap();

    let registry = Registry::new();
    let history = Arc::new(InMemoryHistory::new());
    let cache = NavigationCacheBuilder::<&str, u64, u64>::new(1)
        .with_config(config)
        .with_name("export")
        .with_metrics_registry(PrometheusMetricsRegistry::new(registry.clone()))
        .build(history)
        .unwrap();

    cache.set("scroll", 42);
    cache.get("scroll");
    cache.get("missing");

    let mut buffer = vec![];
    TextEncoder::new().encode(&registry.gather(), &mut buffer).unwrap();
    print!("{}", String::from_utf8_lossy(&buffer));
}
