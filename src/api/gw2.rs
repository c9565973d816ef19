use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::api::cache::SessionCache;
use crate::api::{
    AccountApi, ApiError, ApiResult, CharacterInventory, ItemInfo, ItemPrice, ItemSlot, RecipeInfo,
};
use crate::models::ItemId;

pub const API_URI_BASE: &str = "https://api.guildwars2.com";

/// Permissions the access token must carry for a full inventory walk.
pub const REQUIRED_PERMISSIONS: [&str; 3] = ["account", "characters", "inventories"];

/// Batch size for the id-list endpoints (`/v2/items`, `/v2/commerce/prices`,
/// `/v2/recipes`).
const ITEMS_PER_REQUEST: usize = 200;

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_WAIT: Duration = Duration::from_millis(200);
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Schema pin for `/v2/recipes`, so ingredient entries carry their type.
const RECIPES_SCHEMA: &str = "2022-03-09T02:00:00.000Z";

#[derive(Debug, Deserialize)]
struct TokenInfo {
    #[serde(default)]
    permissions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AccountInfo {
    #[serde(default)]
    name: Option<String>,
}

/// One authenticated session against the official GW2 API.
///
/// Timeouts (HTTP 502/504/408 or a transport timeout) are retried a fixed
/// number of times with a fixed wait before they surface. Per-account
/// results are cached for the lifetime of the session.
pub struct Gw2Client {
    http: Client,
    base: Url,
    api_key: String,
    aborted: Arc<AtomicBool>,
    cache: SessionCache,
}

impl Gw2Client {
    /// Open a session and validate the token: it must exist and carry every
    /// permission in [`REQUIRED_PERMISSIONS`].
    pub async fn connect(api_key: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        let client = Self {
            http,
            base: Url::parse(API_URI_BASE).expect("static base url"),
            api_key: api_key.into(),
            aborted: Arc::new(AtomicBool::new(false)),
            cache: SessionCache::default(),
        };
        client.validate().await?;
        Ok(client)
    }

    async fn validate(&self) -> ApiResult<()> {
        let url = self.auth(self.endpoint(&["v2", "tokeninfo"]));
        let response = self.http.get(url).send().await.map_err(map_transport)?;

        if !response.status().is_success() {
            return Err(ApiError::InvalidAccessToken);
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|_| ApiError::InvalidAccessToken)?;
        let Some(permissions) = info.permissions else {
            return Err(ApiError::InvalidAccessToken);
        };

        for required in REQUIRED_PERMISSIONS {
            if !permissions.iter().any(|p| p == required) {
                return Err(ApiError::MissingPermission(required.to_string()));
            }
        }
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base url can be a base")
            .extend(segments);
        url
    }

    fn auth(&self, mut url: Url) -> Url {
        url.query_pairs_mut()
            .append_pair("access_token", &self.api_key);
        url
    }

    fn check_abort(&self) -> ApiResult<()> {
        if self.aborted.load(Ordering::Relaxed) {
            Err(ApiError::Aborted)
        } else {
            Ok(())
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        self.check_abort()?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_get(url.clone()).await {
                Err(ApiError::Timeout) if attempt < RETRY_ATTEMPTS => {
                    tracing::warn!(%url, attempt, "timeout calling api, retrying");
                    tokio::time::sleep(RETRY_WAIT).await;
                }
                result => return result,
            }
        }
    }

    async fn try_get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.http.get(url).send().await.map_err(map_transport)?;

        let status = response.status();
        if matches!(status.as_u16(), 502 | 504 | 408) {
            return Err(ApiError::Timeout);
        }
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus(status));
        }

        response.json::<T>().await.map_err(map_transport)
    }

    /// Fetch an id-list endpoint in batches of [`ITEMS_PER_REQUEST`].
    async fn get_batched<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        ids: &[u32],
        schema: Option<&str>,
    ) -> ApiResult<Vec<T>> {
        let mut results = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(ITEMS_PER_REQUEST) {
            self.check_abort()?;
            let mut url = self.endpoint(segments);
            {
                let mut query = url.query_pairs_mut();
                if let Some(schema) = schema {
                    query.append_pair("v", schema);
                }
                query.append_pair("ids", &ids_param(chunk));
            }
            let mut page: Vec<T> = self.get_json(url).await?;
            results.append(&mut page);
        }
        Ok(results)
    }
}

#[async_trait::async_trait]
impl AccountApi for Gw2Client {
    fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    fn reset_abort(&self) {
        self.aborted.store(false, Ordering::Relaxed);
    }

    fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }

    async fn account_name(&self) -> ApiResult<String> {
        self.cache
            .account_name
            .get_or_try_init(|| async {
                let url = self.auth(self.endpoint(&["v2", "account"]));
                let account: AccountInfo = self.get_json(url).await?;
                Ok(account.name.unwrap_or_else(|| "?".to_string()))
            })
            .await
            .cloned()
    }

    async fn characters(&self) -> ApiResult<Vec<String>> {
        self.cache
            .characters
            .get_or_try_init(|| async {
                let url = self.auth(self.endpoint(&["v2", "characters"]));
                self.get_json(url).await
            })
            .await
            .cloned()
    }

    async fn character_inventory(&self, character: &str) -> ApiResult<CharacterInventory> {
        let mut cached = self.cache.character_inventories.lock().await;
        if let Some(inventory) = cached.get(character) {
            return Ok(inventory.clone());
        }

        let url = self.auth(self.endpoint(&["v2", "characters", character, "inventory"]));
        let inventory: CharacterInventory = self.get_json(url).await?;
        cached.insert(character.to_string(), inventory.clone());
        Ok(inventory)
    }

    async fn material_storage(&self) -> ApiResult<Vec<ItemSlot>> {
        self.cache
            .material_storage
            .get_or_try_init(|| async {
                let url = self.auth(self.endpoint(&["v2", "account", "materials"]));
                self.get_json(url).await
            })
            .await
            .cloned()
    }

    async fn bank(&self) -> ApiResult<Vec<Option<ItemSlot>>> {
        self.cache
            .bank
            .get_or_try_init(|| async {
                let url = self.auth(self.endpoint(&["v2", "account", "bank"]));
                self.get_json(url).await
            })
            .await
            .cloned()
    }

    async fn shared_slots(&self) -> ApiResult<Vec<Option<ItemSlot>>> {
        self.cache
            .shared_slots
            .get_or_try_init(|| async {
                let url = self.auth(self.endpoint(&["v2", "account", "inventory"]));
                self.get_json(url).await
            })
            .await
            .cloned()
    }

    async fn item_info(&self, ids: &BTreeSet<ItemId>) -> ApiResult<Vec<ItemInfo>> {
        let ids: Vec<u32> = ids.iter().map(|id| id.0).collect();
        self.get_batched(&["v2", "items"], &ids, None).await
    }

    async fn item_prices(&self, ids: &BTreeSet<ItemId>) -> ApiResult<Vec<ItemPrice>> {
        let ids: Vec<u32> = ids.iter().map(|id| id.0).collect();
        self.get_batched(&["v2", "commerce", "prices"], &ids, None)
            .await
    }

    async fn item_price(&self, id: ItemId) -> ApiResult<ItemPrice> {
        let url = self.endpoint(&["v2", "commerce", "prices", &id.to_string()]);
        self.get_json(url).await
    }

    async fn recipes(&self) -> ApiResult<Vec<RecipeInfo>> {
        self.cache
            .recipes
            .get_or_try_init(|| async {
                let ids: Vec<u32> = self.get_json(self.endpoint(&["v2", "recipes"])).await?;
                self.get_batched(&["v2", "recipes"], &ids, Some(RECIPES_SCHEMA))
                    .await
            })
            .await
            .cloned()
    }
}

fn ids_param(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn map_transport(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Http(e)
    }
}
