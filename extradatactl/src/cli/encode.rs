use clap::Args;

use extradata::{EntityKind, EntityRecord, ExtraData, ExtraValue};

use super::{Command, CommandError, Context};

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    key: String,
    value: ExtraValue,
}

/// `KEY=VALUE`, where VALUE is read as JSON when it parses (`3`, `true`,
/// `null`, `[1,2]`, `{"a":1}`, `"quoted"`) and kept as a plain string
/// otherwise. A VALUE starting with `{`, `[` or `"` must be valid JSON.
fn parse_key_value(raw: &str) -> Result<KeyValue, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = match serde_json::from_str::<ExtraValue>(value) {
        Ok(parsed) => parsed,
        Err(e) if value.trim_start().starts_with(['{', '[', '"']) => {
            return Err(format!("invalid JSON value for '{key}': {e}"));
        }
        Err(_) => ExtraValue::String(value.to_string()),
    };
    Ok(KeyValue {
        key: key.to_string(),
        value,
    })
}

#[derive(Args, Debug)]
pub struct EncodeCommand {
    #[arg(value_name = "KEY=VALUE", value_parser = parse_key_value, help = "Entries of the mapping")]
    pairs: Vec<KeyValue>,
    #[arg(
        long,
        requires = "id",
        help = "Wrap the column in an entity record of this kind (message, channel or user)"
    )]
    kind: Option<EntityKind>,
    #[arg(long, requires = "kind", help = "Entity id for --kind")]
    id: Option<String>,
}

impl EncodeCommand {
    fn build(&self) -> Result<ExtraData, CommandError> {
        let mut data = ExtraData::new();
        for pair in &self.pairs {
            if data.insert(pair.key.clone(), pair.value.clone()).is_some() {
                return Err(CommandError::Generic(format!(
                    "duplicate key '{}'",
                    pair.key
                )));
            }
        }
        Ok(data)
    }

    fn render(&self, ctx: &Context) -> Result<String, CommandError> {
        let data = self.build()?;
        match (self.kind, &self.id) {
            (Some(kind), Some(id)) => {
                let record = EntityRecord::with_extra_data(kind, id.as_str(), &data, &ctx.codec)?;
                Ok(serde_json::to_string(&record)?)
            }
            _ => Ok(ctx.codec.encode(&data)?),
        }
    }
}

impl Command for EncodeCommand {
    fn execute(&self, ctx: &Context) -> Result<(), CommandError> {
        println!("{}", self.render(ctx)?);
        Ok(())
    }
}
