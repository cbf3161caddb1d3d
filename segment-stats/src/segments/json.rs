use serde_json::{Map, Value};
use tracing::instrument;

use super::extension::DescriptionLookup;
use super::options::StatsOptions;
use super::render::Emitter;
use super::stats::SegmentsStats;
use crate::error::{Result, StatsError};
use crate::utils::byte_size::ByteSize;

/// Builds a JSON document, keeping fields in emission order.
#[derive(Debug, Default)]
pub struct JsonEmitter {
    human_readable: bool,
    root: Map<String, Value>,
    open: Vec<(String, Map<String, Value>)>,
}

impl JsonEmitter {
    pub fn new(human_readable: bool) -> Self {
        Self {
            human_readable,
            ..Self::default()
        }
    }

    fn current(&mut self) -> &mut Map<String, Value> {
        match self.open.last_mut() {
            Some((_, object)) => object,
            None => &mut self.root,
        }
    }

    fn insert(&mut self, name: &str, value: Value) {
        self.current().insert(name.to_string(), value);
    }

    /// Returns the document once every object has been closed.
    pub fn finish(self) -> Result<Value> {
        if let Some((name, _)) = self.open.last() {
            return Err(StatsError::render(format!("object `{name}` was never closed")));
        }
        Ok(Value::Object(self.root))
    }
}

impl Emitter for JsonEmitter {
    type Error = StatsError;

    fn begin_object(&mut self, name: &str) -> Result<()> {
        self.open.push((name.to_string(), Map::new()));
        Ok(())
    }

    fn field_u64(&mut self, name: &str, value: u64) -> Result<()> {
        self.insert(name, Value::from(value));
        Ok(())
    }

    fn field_i64(&mut self, name: &str, value: i64) -> Result<()> {
        self.insert(name, Value::from(value));
        Ok(())
    }

    fn field_str(&mut self, name: &str, value: &str) -> Result<()> {
        self.insert(name, Value::from(value));
        Ok(())
    }

    fn human_readable_field(
        &mut self,
        raw_name: &str,
        human_name: &str,
        value: ByteSize,
    ) -> Result<()> {
        if self.human_readable {
            self.insert(human_name, Value::from(value.to_string()));
        }
        self.insert(raw_name, Value::from(value.bytes()));
        Ok(())
    }

    fn end_object(&mut self) -> Result<()> {
        let (name, object) = self
            .open
            .pop()
            .ok_or_else(|| StatsError::render("end_object without a matching begin_object"))?;
        self.insert(&name, Value::Object(object));
        Ok(())
    }
}

impl SegmentsStats {
    /// Renders a JSON report honouring `options`. File sizes are left out
    /// unless `include_file_sizes` is set.
    #[instrument(skip_all, fields(human_readable = options.human_readable))]
    pub fn report<L>(&self, options: &StatsOptions, lookup: &L) -> Result<Value>
    where
        L: DescriptionLookup + ?Sized,
    {
        let mut emitter = JsonEmitter::new(options.human_readable);
        if options.include_file_sizes {
            self.render(&mut emitter, lookup)?;
        } else {
            let mut stats = self.clone();
            stats.clear_file_sizes();
            stats.render(&mut emitter, lookup)?;
        }
        emitter.finish()
    }
}
