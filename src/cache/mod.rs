//! 缓存层
//!
//! 以插件形式注册缓存后端（moka 内存缓存 / redis），启动时按配置选择。
//! 目前用于缓存已认证账号的会话信息。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// 插件类型需要提供 `fn new() -> Result<Self, String>`，
/// 在程序加载时通过 ctor 写入全局注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::SchoolError::cache_connection)?;
                        Ok::<Box<dyn $crate::cache::ObjectCache>, $crate::errors::SchoolError>(
                            Box::new(cache),
                        )
                    }) as $crate::cache::register::BoxedObjectCacheFuture
                }),
            );
        }
    };
}
