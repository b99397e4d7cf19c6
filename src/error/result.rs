//! Result type alias for Closet operations.

use super::closet_error::ClosetError;

/// Type alias for Results using ClosetError.
///
/// # Example
///
/// ```ignore
/// use closet::error::ClosetResult;
///
/// async fn current_weather(client: &ClosetClient) -> ClosetResult<WeatherSnapshot> {
///     client.weather().fetch().await
/// }
/// ```
pub type ClosetResult<T> = Result<T, ClosetError>;
