use crate::cost::MatrixLookup;
use crate::job::Job;
use crate::model::{AttributeConfig, Order};
use fastrand::Rng;

/// Shape of a generated job.
#[derive(Debug, Clone)]
pub struct SynthSpec {
    pub orders: usize,
    pub attributes: usize,
    pub values_per_attribute: usize,
    /// Attributes are dealt round-robin into this many parallel groups.
    /// 0 leaves every attribute ungrouped.
    pub groups: usize,
    /// Share of value pairs per attribute that get a matrix entry.
    pub matrix_density: f64,
    pub seed: u64,
}

impl Default for SynthSpec {
    fn default() -> Self {
        Self {
            orders: 50,
            attributes: 3,
            values_per_attribute: 4,
            groups: 0,
            matrix_density: 0.0,
            seed: 42,
        }
    }
}

/// Builds a reproducible random job: same spec, same job.
pub fn generate_job(spec: &SynthSpec) -> Job {
    let mut rng = Rng::with_seed(spec.seed);
    let values = spec.values_per_attribute.max(1);

    let attributes: Vec<AttributeConfig> = (0..spec.attributes)
        .map(|a| {
            let minutes = rng.u32(5..=60) as f64;
            let attr = AttributeConfig::new(format!("Attr{}", a + 1), minutes);
            if spec.groups > 0 {
                attr.with_group(format!("G{}", a % spec.groups + 1))
            } else {
                attr
            }
        })
        .collect();

    let orders: Vec<Order> = (0..spec.orders)
        .map(|i| {
            let row: Vec<(String, String)> = attributes
                .iter()
                .map(|attr| {
                    let v = rng.usize(0..values);
                    (attr.column.clone(), format!("V{}", v + 1))
                })
                .collect();
            Order::new(format!("ORD-{:05}", i + 1), i, row)
        })
        .collect();

    let mut job = Job::new(attributes, orders);
    job.name = Some(format!("synthetic-{}", spec.seed));

    if spec.matrix_density > 0.0 {
        let mut matrix = MatrixLookup::new();
        for attr in &job.attributes {
            for from in 1..=values {
                for to in 1..=values {
                    if from != to && rng.f64() < spec.matrix_density {
                        let minutes = rng.u32(1..=attr.changeover_time as u32 * 2) as f64;
                        matrix.insert(
                            attr.column.as_str(),
                            format!("V{}", from),
                            format!("V{}", to),
                            minutes,
                        );
                    }
                }
            }
        }
        job.matrix = Some(matrix);
    }

    job
}
