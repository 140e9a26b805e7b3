//! Rate limiting middleware
//!
//! One token bucket per client key. The visitor map is owned by [`RateLimiter`], guarded by a
//! single mutex and bounded by `max_visitors`; idle visitors are swept at most once per window,
//! oldest first, so eviction never scans the whole map.

use super::helpers::{client_key, reject};
use crate::config::RateLimitConfig;
use crate::utils::error::{ApiError, Result as ApiResult};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use governor::clock::{Clock, DefaultClock, Reference};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::num::NonZeroU32;
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type Bucket<C> = governor::RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<<C as Clock>::Instant>>;

struct Visitor<C: Clock> {
    bucket: Arc<Bucket<C>>,
    last_seen: C::Instant,
    /// Position in [`Visitors::recency`]
    seq: u64,
}

struct Visitors<C: Clock> {
    entries: HashMap<Arc<str>, Visitor<C>>,
    /// Keys ordered from least to most recently seen
    recency: BTreeMap<u64, Arc<str>>,
    next_seq: u64,
    last_sweep: C::Instant,
}

impl<C: Clock> Visitors<C> {
    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn pop_oldest(&mut self) -> Option<Arc<str>> {
        let (_, key) = self.recency.pop_first()?;
        self.entries.remove(&key);
        Some(key)
    }

    /// Last-seen time of the least recently seen visitor
    fn oldest_seen(&self) -> Option<C::Instant> {
        let (_, key) = self.recency.first_key_value()?;
        self.entries.get(key).map(|visitor| visitor.last_seen)
    }
}

/// Per-client token bucket limiter
pub struct RateLimiter<C: Clock = DefaultClock> {
    quota: Quota,
    clock: C,
    window: Duration,
    idle_after: Duration,
    max_visitors: usize,
    visitors: Mutex<Visitors<C>>,
}

impl RateLimiter<DefaultClock> {
    pub fn from_config(config: &RateLimitConfig) -> ApiResult<Self> {
        Self::with_clock(config, DefaultClock::default())
    }
}

impl<C: Clock> RateLimiter<C> {
    /// Buckets refill one token every `window / rate` up to `burst`
    pub fn with_clock(config: &RateLimitConfig, clock: C) -> ApiResult<Self> {
        config.validate().map_err(ApiError::config)?;

        let window = config.window();
        let burst = NonZeroU32::new(config.burst)
            .ok_or_else(|| ApiError::config("Rate limit burst cannot be 0"))?;
        let quota = Quota::with_period(window / config.rate)
            .ok_or_else(|| ApiError::config("Rate limit refill interval is zero"))?
            .allow_burst(burst);
        let idle_after = window
            .checked_mul(config.idle_windows)
            .ok_or_else(|| ApiError::config("Rate limit idle period overflows"))?;

        let now = clock.now();
        Ok(Self {
            quota,
            clock,
            window,
            idle_after,
            max_visitors: config.max_visitors,
            visitors: Mutex::new(Visitors {
                entries: HashMap::new(),
                recency: BTreeMap::new(),
                next_seq: 0,
                last_sweep: now,
            }),
        })
    }

    /// Take one token for `key`; `false` means the request must be refused
    pub fn check(&self, key: &str) -> bool {
        let bucket = {
            let mut visitors = self.visitors.lock();
            let now = self.clock.now();
            let seq = visitors.next_seq();

            let touched = visitors.entries.get_mut(key).map(|visitor| {
                let previous = std::mem::replace(&mut visitor.seq, seq);
                visitor.last_seen = now;
                (previous, visitor.bucket.clone())
            });

            match touched {
                Some((previous, bucket)) => {
                    if let Some(key) = visitors.recency.remove(&previous) {
                        visitors.recency.insert(seq, key);
                    }
                    bucket
                }
                None => {
                    self.make_room(&mut visitors, now);
                    let bucket = Arc::new(Bucket::<C>::direct_with_clock(self.quota, &self.clock));
                    let key: Arc<str> = Arc::from(key);
                    visitors.recency.insert(seq, key.clone());
                    visitors.entries.insert(
                        key,
                        Visitor {
                            bucket: bucket.clone(),
                            last_seen: now,
                            seq,
                        },
                    );
                    bucket
                }
            }
        };

        bucket.check().is_ok()
    }

    /// Number of tracked clients
    pub fn visitor_count(&self) -> usize {
        self.visitors.lock().entries.len()
    }

    /// Drop idle visitors from the old end, then the least recently seen one if still full.
    ///
    /// Only evicted entries are visited.
    fn make_room(&self, visitors: &mut Visitors<C>, now: C::Instant) {
        let since_sweep = Duration::from(now.duration_since(visitors.last_sweep));
        let full = visitors.entries.len() >= self.max_visitors;

        if since_sweep >= self.window || full {
            let mut swept = 0;
            while let Some(last_seen) = visitors.oldest_seen() {
                if Duration::from(now.duration_since(last_seen)) <= self.idle_after {
                    break;
                }
                visitors.pop_oldest();
                swept += 1;
            }
            visitors.last_sweep = now;

            if swept > 0 {
                debug!("Evicted {} idle rate limit visitors", swept);
            }
        }

        if visitors.entries.len() >= self.max_visitors {
            if let Some(key) = visitors.pop_oldest() {
                debug!("Visitor map full, evicted least recently seen client {}", key);
            }
        }
    }
}

/// Rate limiting middleware for Actix-web
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Arc<RateLimiter>,
    trust_forwarded_for: bool,
}

impl RateLimitMiddleware {
    pub fn new(limiter: Arc<RateLimiter>, trust_forwarded_for: bool) -> Self {
        Self {
            limiter,
            trust_forwarded_for,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            trust_forwarded_for: self.trust_forwarded_for,
        }))
    }
}

/// Service implementation for rate limit middleware
pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limiter: Arc<RateLimiter>,
    trust_forwarded_for: bool,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let key = client_key(&req, self.trust_forwarded_for);

        if !self.limiter.check(&key) {
            debug!(client = %key, "rate limit exceeded");
            let res = reject(req, ApiError::rate_limited("Rate limit Exceeded"));
            return Box::pin(async move { Ok(res) });
        }

        let service = self.service.clone();
        Box::pin(async move {
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
