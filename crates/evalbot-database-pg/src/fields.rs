use std::ops::Deref;

use evalbot_models::Sentiment;
use sqlx::{
    postgres::{PgTypeInfo, PgValueRef},
    Decode, Postgres, Type,
};

pub struct SentimentDecode(Sentiment);
impl<'r> Decode<'r, Postgres> for SentimentDecode {
    fn decode(value: PgValueRef) -> core::result::Result<Self, sqlx::error::BoxDynError> {
        let str_value = <&str as Decode<Postgres>>::decode(value)?;
        Sentiment::try_from(str_value).map(Self).map_err(Into::into)
    }
}

impl Type<Postgres> for SentimentDecode {
    fn type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("varchar")
    }
}

impl Deref for SentimentDecode {
    type Target = Sentiment;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
