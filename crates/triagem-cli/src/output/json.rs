use serde::Serialize;
use triagem_core::error::TriagemError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), TriagemError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
