//! 日志宏
//!
//! `caller!()` 是唯一自动提供调用者身份的位置，其余宏都经由它取得身份。

/// 取得当前函数的调用者身份
///
/// ```rust
/// struct Checkout;
///
/// impl Checkout {
///     fn submit(&self) -> dual_log::CallerIdentity {
///         dual_log::caller!()
///     }
/// }
///
/// let identity = Checkout.submit();
/// assert_eq!(identity.declaring_type, "Checkout");
/// assert_eq!(identity.method_name, "submit");
/// ```
#[macro_export]
macro_rules! caller {
    () => {{
        fn __dual_log_caller() {}
        fn __dual_log_type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::core::caller::CallerResolver::resolve(__dual_log_type_name_of(__dual_log_caller))
    }};
}

/// 以调用者身份记录消息，可带位置参数
///
/// 参数通过 `ToString` 预先渲染。
#[macro_export]
macro_rules! emit {
    ($logger:expr, $severity:expr, $template:expr $(,)?) => {
        $logger.log($severity, &$crate::caller!(), $template)
    };
    ($logger:expr, $severity:expr, $template:expr, $($arg:expr),+ $(,)?) => {
        $logger.log_fmt(
            $severity,
            &$crate::caller!(),
            $template,
            &[$(::std::string::ToString::to_string(&$arg)),+],
        )
    };
}

/// 以调用者身份记录带上下文属性的消息
#[macro_export]
macro_rules! emit_with {
    ($logger:expr, $severity:expr, $properties:expr, $template:expr $(,)?) => {
        $logger.log_with($severity, &$crate::caller!(), $properties, $template)
    };
    ($logger:expr, $severity:expr, $properties:expr, $template:expr, $($arg:expr),+ $(,)?) => {
        $logger.log_fmt_with(
            $severity,
            &$crate::caller!(),
            $properties,
            $template,
            &[$(::std::string::ToString::to_string(&$arg)),+],
        )
    };
}

/// 以调用者身份记录错误
#[macro_export]
macro_rules! emit_error {
    ($logger:expr, $severity:expr, $error:expr $(,)?) => {
        $logger.log_error($severity, &$crate::caller!(), $error)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::event::Properties;
    use crate::core::severity::Severity;
    use crate::logger::Logger;
    use crate::sinks::memory::MemorySink;
    use std::sync::Arc;

    struct Sessions {
        logger: Logger,
    }

    impl Sessions {
        fn login(&self, user: &str) -> crate::Result<()> {
            crate::emit!(self.logger, Severity::Informational, "User {0} logged in", user)
        }

        fn ping(&self) -> crate::Result<()> {
            crate::emit!(self.logger, Severity::Debug, "ping")
        }

        fn tag(&self, properties: &Properties) -> crate::Result<()> {
            crate::emit_with!(self.logger, Severity::Warning, properties, "{0}/{1}", 1, 2)
        }

        fn fail(&self) -> crate::Result<()> {
            let err = std::io::Error::new(std::io::ErrorKind::Other, "refused");
            crate::emit_error!(self.logger, Severity::Error, &err)
        }
    }

    fn sessions() -> (Sessions, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::with_sink("Sessions", Arc::new(sink.clone()));
        (Sessions { logger }, sink)
    }

    #[test]
    fn test_emit_prefixes_method() {
        let (sessions, sink) = sessions();
        sessions.login("alice").unwrap();
        sessions.ping().unwrap();

        let messages: Vec<String> = sink.events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["login: User alice logged in", "ping: ping"]);
    }

    #[test]
    fn test_emit_with_and_error() {
        let (sessions, sink) = sessions();
        let mut props = Properties::new();
        props.insert("shard".to_string(), serde_json::json!("eu-1"));
        sessions.tag(&props).unwrap();
        sessions.fail().unwrap();

        let events = sink.events();
        assert_eq!(events[0].message, "tag: 1/2");
        assert_eq!(events[0].properties["shard"], "eu-1");
        assert_eq!(events[1].message, "fail: Exception occurred.");
        assert!(events[1].exception.is_some());
    }
}
