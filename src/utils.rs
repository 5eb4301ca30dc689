#[macro_export]
macro_rules! api_funcs {
    ( $( ( $method:ident, $func_name:ident, $url:expr, $status:ident $(, $arg:ident : $arg_ty:ty )* ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[$method($url)]
                async fn $func_name(
                    state: web::Data<AppState>,
                    $( $arg: $arg_ty ),*
                ) -> Result<HttpResponse, ApiError> {
                    match [<$func_name _impl>](state, $( $arg ),*).await {
                        Ok(response) => Ok(HttpResponse::$status().json(response)),
                        Err(err) => {
                            err.log(stringify!($func_name));
                            Err(err)
                        }
                    }
                }
            }
        )+
    };
}

use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

pub fn format_time_str(time: &NaiveDateTime) -> String {
    const TIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    format!("{}+00:00", time.format(TIME_FMT))
}

pub fn serialize_time<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_time_str(time))
}

pub fn serialize_time_opt<S: Serializer>(
    time: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(time) => serialize_time(time, serializer),
        None => serializer.serialize_none(),
    }
}

/// Decodes an explicit `null` as the field's zero value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn parse_date_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.as_ref(), "%Y-%m-%d").context("expected YYYY-MM-DD")
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time_of_day_str<S: AsRef<str>>(s: S) -> anyhow::Result<NaiveTime> {
    let s = s.as_ref();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .context("expected HH:MM or HH:MM:SS")
}
