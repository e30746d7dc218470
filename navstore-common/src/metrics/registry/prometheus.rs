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

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use prometheus::{IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry};

use crate::metrics::{
    BoxedCounter, BoxedCounterVec, BoxedGauge, BoxedGaugeVec, Boxer, CounterOps, CounterVecOps, GaugeOps, GaugeVecOps,
    RegistryOps,
};

#[derive(Debug, Clone)]
enum MetricVec {
    Counter(IntCounterVec),
    Gauge(IntGaugeVec),
}

impl CounterOps for IntCounter {
    fn increase(&self, val: u64) {
        self.inc_by(val);
    }
}

impl CounterVecOps for IntCounterVec {
    fn counter(&self, labels: &[&str]) -> BoxedCounter {
        self.with_label_values(labels).boxed()
    }
}

impl GaugeOps for IntGauge {
    fn increase(&self, val: u64) {
        self.add(val as _);
    }

    fn decrease(&self, val: u64) {
        self.sub(val as _);
    }

    fn absolute(&self, val: u64) {
        self.set(val as _);
    }
}

impl GaugeVecOps for IntGaugeVec {
    fn gauge(&self, labels: &[&str]) -> BoxedGauge {
        self.with_label_values(labels).boxed()
    }
}

/// Prometheus metric registry with lib `prometheus`.
///
/// The [`PrometheusMetricsRegistry`] can be cloned and used by multiple navstore instances, without worrying about
/// duplicately registering.
#[derive(Debug, Clone)]
pub struct PrometheusMetricsRegistry {
    registry: Registry,
    vecs: Arc<Mutex<HashMap<&'static str, MetricVec>>>,
}

impl PrometheusMetricsRegistry {
    /// Create an Prometheus metrics registry.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            vecs: Arc::default(),
        }
    }

    /// The underlying prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn get_or_register(&self, name: &'static str, create: impl FnOnce() -> prometheus::Result<MetricVec>) -> MetricVec {
        let mut vecs = self.vecs.lock();
        if let Some(vec) = vecs.get(name) {
            return vec.clone();
        }
        let vec = match create() {
            Ok(vec) => vec,
            Err(e) => panic!("invalid metric definition {name}: {e}"),
        };
        let collector: Box<dyn prometheus::core::Collector> = match &vec {
            MetricVec::Counter(v) => Box::new(v.clone()),
            MetricVec::Gauge(v) => Box::new(v.clone()),
        };
        // The metric still works unexported if the registry refuses it, e.g. on a name clash with a foreign collector.
        if let Err(e) = self.registry.register(collector) {
            tracing::warn!(name, ?e, "[prometheus]: register metric vector failed");
        }
        vecs.insert(name, vec.clone());
        vec
    }
}

impl RegistryOps for PrometheusMetricsRegistry {
    fn register_counter_vec(
        &self,
        name: &'static str,
        desc: &'static str,
        label_names: &'static [&'static str],
    ) -> BoxedCounterVec {
        match self.get_or_register(name, || {
            IntCounterVec::new(Opts::new(name, desc), label_names).map(MetricVec::Counter)
        }) {
            MetricVec::Counter(v) => v.boxed(),
            MetricVec::Gauge(_) => panic!("metric {name} is already registered as a gauge vector"),
        }
    }

    fn register_gauge_vec(
        &self,
        name: &'static str,
        desc: &'static str,
        label_names: &'static [&'static str],
    ) -> BoxedGaugeVec {
        match self.get_or_register(name, || IntGaugeVec::new(Opts::new(name, desc), label_names).map(MetricVec::Gauge)) {
            MetricVec::Gauge(v) => v.boxed(),
            MetricVec::Counter(_) => panic!("metric {name} is already registered as a counter vector"),
        }
    }
}
