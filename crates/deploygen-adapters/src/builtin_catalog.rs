//! Built-in template catalog.
//!
//! The full set of configuration documents the platform reads, once per
//! [`ConfigFormat`]. Both versions carry the same six stems and the same
//! placeholders; only the document layout differs. Bodies are data: adding
//! a key means editing a string here and, if it needs a new value, adding
//! it to `RenderContext::from_parameters`.
//!
//! Values are substituted verbatim. The YAML layout leaves scalars unquoted,
//! matching what the services' loaders expect.

use deploygen_core::domain::{ConfigFormat, ConfigTemplate};

/// Every built-in template for `format`, in catalog order.
pub fn templates(format: ConfigFormat) -> &'static [ConfigTemplate] {
    match format {
        ConfigFormat::Ini => INI,
        ConfigFormat::Yaml => YAML,
    }
}

// ── shared placeholder lists ─────────────────────────────────────────────────

const REDIS_KEYS: &[&str] = &["REDIS_ADDR", "REDIS_PASS", "REDIS_SENTINEL_PASS"];

const MONGODB_KEYS: &[&str] = &[
    "MONGO_HOST",
    "MONGO_PORT",
    "MONGO_USER",
    "MONGO_PASS",
    "DATABASE",
    "MONGO_RS_NAME",
    "MONGO_TXN_ENABLED",
];

const COMMON_KEYS: &[&str] = &[
    "AUTH_ENABLED",
    "AUTH_ADDRESS",
    "AUTH_APP_CODE",
    "AUTH_APP_SECRET",
    "DISCOVERY",
    "FULL_TEXT_SEARCH",
    "ES_URL",
    "ES_USER",
    "ES_PASS",
    "USER_INFO",
    "SESSION_SKIP",
    "SITE_URL",
    "PAAS_URL",
    "UI_ROOT",
    "AGENT_URL",
    "AUTH_SCHEME",
    "LOGIN_VERSION",
];

const MIGRATE_KEYS: &[&str] = &[
    "DISCOVERY",
    "MONGO_HOST",
    "MONGO_PORT",
    "MONGO_USER",
    "MONGO_PASS",
    "DATABASE",
    "MONGO_RS_NAME",
    "REDIS_ADDR",
    "REDIS_PASS",
    "CONFIGURES_DIR",
    "AUTH_ADDRESS",
    "AUTH_APP_CODE",
    "AUTH_APP_SECRET",
    "AUTH_SYNC_WORKERS",
    "AUTH_SYNC_INTERVAL_MINUTES",
];

const CRYPTO_KEYS: &[&str] = &[
    "CRYPTO_ENABLED",
    "CRYPTO_KEY_URL",
    "CRYPTO_ADDRS",
    "CRYPTO_TOKEN",
    "CRYPTO_PROJECT",
    "CRYPTO_ENV",
];

// ── ini ──────────────────────────────────────────────────────────────────────

static INI: &[ConfigTemplate] = &[
    ConfigTemplate {
        name: "redis",
        format: ConfigFormat::Ini,
        placeholders: REDIS_KEYS,
        body: r#"[redis]
host = {{REDIS_ADDR}}
pwd = {{REDIS_PASS}}
sentinelPwd = {{REDIS_SENTINEL_PASS}}
database = 0
maxOpenConns = 3000
maxIDleConns = 1000

[snap-redis]
host = {{REDIS_ADDR}}
pwd = {{REDIS_PASS}}
database = 0

[discover-redis]
host = {{REDIS_ADDR}}
pwd = {{REDIS_PASS}}
database = 0

[netcollect-redis]
host = {{REDIS_ADDR}}
pwd = {{REDIS_PASS}}
database = 0
"#,
    },
    ConfigTemplate {
        name: "mongodb",
        format: ConfigFormat::Ini,
        placeholders: MONGODB_KEYS,
        body: r#"[mongodb]
host = {{MONGO_HOST}}
port = {{MONGO_PORT}}
usr = {{MONGO_USER}}
pwd = {{MONGO_PASS}}
database = {{DATABASE}}
maxOpenConns = 3000
maxIdleConns = 100
mechanism = SCRAM-SHA-1
rsName = {{MONGO_RS_NAME}}
txnEnabled = {{MONGO_TXN_ENABLED}}
"#,
    },
    ConfigTemplate {
        name: "common",
        format: ConfigFormat::Ini,
        placeholders: COMMON_KEYS,
        body: r#"[auth]
enable = {{AUTH_ENABLED}}
address = {{AUTH_ADDRESS}}
appCode = {{AUTH_APP_CODE}}
appSecret = {{AUTH_APP_SECRET}}

[gse]
addr = {{DISCOVERY}}
user = bkzk
pwd = L%blKas

[timer]
spec = 00:30  # 00:00 - 23:59

[es]
full_text_search = {{FULL_TEXT_SEARCH}}
url = {{ES_URL}}
usr = {{ES_USER}}
pwd = {{ES_PASS}}

[api]
version = v3

[session]
name = cc3
skip = {{SESSION_SKIP}}
defaultlanguage = zh-cn
multiple_owner = 0
user_info = {{USER_INFO}}

[site]
domain_url = {{SITE_URL}}
bk_login_url = {{PAAS_URL}}/login/?app_id=%s&c_url=%s
app_code = cc
check_url = {{PAAS_URL}}/login/accounts/get_user/?bk_token=
bk_account_url = {{PAAS_URL}}/login/accounts/get_all_user/?bk_token=%s
resources_path = /tmp/
html_root = {{UI_ROOT}}
full_text_search = {{FULL_TEXT_SEARCH}}

[app]
agent_app_url = {{AGENT_URL}}/console/?app=bk_agent_setup
authscheme = {{AUTH_SCHEME}}

[login]
version = {{LOGIN_VERSION}}
"#,
    },
    ConfigTemplate {
        name: "extra",
        format: ConfigFormat::Ini,
        placeholders: &[],
        body: "",
    },
    ConfigTemplate {
        name: "migrate",
        format: ConfigFormat::Ini,
        placeholders: MIGRATE_KEYS,
        body: r#"[config-server]
addrs = {{DISCOVERY}}
usr =
pwd =

[register-server]
addrs = {{DISCOVERY}}
usr =
pwd =

[mongodb]
host = {{MONGO_HOST}}
port = {{MONGO_PORT}}
usr = {{MONGO_USER}}
pwd = {{MONGO_PASS}}
database = {{DATABASE}}
maxOpenConns = 5
maxIdleConns = 1
mechanism = SCRAM-SHA-1
rsName = {{MONGO_RS_NAME}}

[redis]
host = {{REDIS_ADDR}}
pwd = {{REDIS_PASS}}
database = 0
maxOpenConns = 5
maxIDleConns = 1

[confs]
dir = {{CONFIGURES_DIR}}

[errors]
res = conf/errors

[language]
res = conf/language

[auth]
address = {{AUTH_ADDRESS}}
appCode = {{AUTH_APP_CODE}}
appSecret = {{AUTH_APP_SECRET}}
enableSync = false
syncWorkers = {{AUTH_SYNC_WORKERS}}
syncIntervalMinutes = {{AUTH_SYNC_INTERVAL_MINUTES}}
"#,
    },
    ConfigTemplate {
        name: "crypto",
        format: ConfigFormat::Ini,
        placeholders: CRYPTO_KEYS,
        body: r#"[crypto]
enabled = {{CRYPTO_ENABLED}}
secretKeyUrl = {{CRYPTO_KEY_URL}}
secretsAddrs = {{CRYPTO_ADDRS}}
secretsToken = {{CRYPTO_TOKEN}}
secretsProject = {{CRYPTO_PROJECT}}
secretsEnv = {{CRYPTO_ENV}}
"#,
    },
];

// ── yaml ─────────────────────────────────────────────────────────────────────

static YAML: &[ConfigTemplate] = &[
    ConfigTemplate {
        name: "redis",
        format: ConfigFormat::Yaml,
        placeholders: REDIS_KEYS,
        body: r#"redis:
  host: "{{REDIS_ADDR}}"
  pwd: "{{REDIS_PASS}}"
  sentinelPwd: "{{REDIS_SENTINEL_PASS}}"
  database: "0"
  maxOpenConns: 3000
  maxIDleConns: 1000
  snap:
    host: "{{REDIS_ADDR}}"
    pwd: "{{REDIS_PASS}}"
    database: "0"
  discover:
    host: "{{REDIS_ADDR}}"
    pwd: "{{REDIS_PASS}}"
    database: "0"
  netCollect:
    host: "{{REDIS_ADDR}}"
    pwd: "{{REDIS_PASS}}"
    database: "0"
"#,
    },
    ConfigTemplate {
        name: "mongodb",
        format: ConfigFormat::Yaml,
        placeholders: MONGODB_KEYS,
        body: r#"mongodb:
  host: "{{MONGO_HOST}}"
  port: {{MONGO_PORT}}
  usr: "{{MONGO_USER}}"
  pwd: "{{MONGO_PASS}}"
  database: "{{DATABASE}}"
  maxOpenConns: 3000
  maxIdleConns: 100
  mechanism: SCRAM-SHA-1
  rsName: "{{MONGO_RS_NAME}}"
  txnEnabled: {{MONGO_TXN_ENABLED}}
"#,
    },
    ConfigTemplate {
        name: "common",
        format: ConfigFormat::Yaml,
        placeholders: COMMON_KEYS,
        body: r#"auth:
  enable: {{AUTH_ENABLED}}
  address: "{{AUTH_ADDRESS}}"
  appCode: "{{AUTH_APP_CODE}}"
  appSecret: "{{AUTH_APP_SECRET}}"

gse:
  addr: "{{DISCOVERY}}"
  user: bkzk
  pwd: L%blKas

timer:
  # 00:00 - 23:59
  spec: "00:30"

es:
  fullTextSearch: {{FULL_TEXT_SEARCH}}
  url: "{{ES_URL}}"
  usr: "{{ES_USER}}"
  pwd: "{{ES_PASS}}"

api:
  version: v3

session:
  name: cc3
  skip: "{{SESSION_SKIP}}"
  defaultlanguage: zh-cn
  multipleOwner: "0"
  userInfo: "{{USER_INFO}}"

site:
  domainUrl: "{{SITE_URL}}"
  bkLoginUrl: "{{PAAS_URL}}/login/?app_id=%s&c_url=%s"
  appCode: cc
  checkUrl: "{{PAAS_URL}}/login/accounts/get_user/?bk_token="
  bkAccountUrl: "{{PAAS_URL}}/login/accounts/get_all_user/?bk_token=%s"
  resourcesPath: /tmp/
  htmlRoot: "{{UI_ROOT}}"
  fullTextSearch: {{FULL_TEXT_SEARCH}}

app:
  agentAppUrl: "{{AGENT_URL}}/console/?app=bk_agent_setup"
  authscheme: {{AUTH_SCHEME}}

login:
  version: {{LOGIN_VERSION}}
"#,
    },
    ConfigTemplate {
        name: "extra",
        format: ConfigFormat::Yaml,
        placeholders: &[],
        body: "",
    },
    ConfigTemplate {
        name: "migrate",
        format: ConfigFormat::Yaml,
        placeholders: MIGRATE_KEYS,
        body: r#"configServer:
  addrs: "{{DISCOVERY}}"
  usr:
  pwd:

registerServer:
  addrs: "{{DISCOVERY}}"
  usr:
  pwd:

mongodb:
  host: "{{MONGO_HOST}}"
  port: {{MONGO_PORT}}
  usr: "{{MONGO_USER}}"
  pwd: "{{MONGO_PASS}}"
  database: "{{DATABASE}}"
  maxOpenConns: 5
  maxIdleConns: 1
  mechanism: SCRAM-SHA-1
  rsName: "{{MONGO_RS_NAME}}"

redis:
  host: "{{REDIS_ADDR}}"
  pwd: "{{REDIS_PASS}}"
  database: "0"
  maxOpenConns: 5
  maxIDleConns: 1

confs:
  dir: "{{CONFIGURES_DIR}}"

errors:
  res: conf/errors

language:
  res: conf/language

auth:
  address: "{{AUTH_ADDRESS}}"
  appCode: "{{AUTH_APP_CODE}}"
  appSecret: "{{AUTH_APP_SECRET}}"
  enableSync: false
  syncWorkers: {{AUTH_SYNC_WORKERS}}
  syncIntervalMinutes: {{AUTH_SYNC_INTERVAL_MINUTES}}
"#,
    },
    ConfigTemplate {
        name: "crypto",
        format: ConfigFormat::Yaml,
        placeholders: CRYPTO_KEYS,
        body: r#"crypto:
  enabled: {{CRYPTO_ENABLED}}
  secretKeyUrl: "{{CRYPTO_KEY_URL}}"
  secretsAddrs: "{{CRYPTO_ADDRS}}"
  secretsToken: "{{CRYPTO_TOKEN}}"
  secretsProject: "{{CRYPTO_PROJECT}}"
  secretsEnv: "{{CRYPTO_ENV}}"
"#,
    },
];
