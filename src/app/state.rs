// ==========================================
// 超市销售数据看板 - 应用状态
// ==========================================
// 职责: 启动时一次性构建快照与页面目录，持有共享的 API 实例
// ==========================================

use std::sync::Arc;

use crate::api::{DashboardApi, RenderSettings};
use crate::app::snapshot::{SalesSnapshot, SnapshotOptions};
use crate::config::{DashboardConfig, PageCatalog};
use crate::i18n;

/// 应用状态
///
/// 快照与目录构建后只读，渲染层通过 Arc 共享
pub struct AppState {
    /// 生效配置
    pub config: DashboardConfig,

    /// 销售快照
    pub snapshot: Arc<SalesSnapshot>,

    /// 页面目录
    pub catalog: Arc<PageCatalog>,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 已合并（文件 → 环境变量 → 命令行）的配置
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 解析数据文件路径并加载快照（失败时降级为占位数据）
    /// 2. 加载页面目录（失败时使用内置目录）
    /// 3. 创建看板API
    pub fn new(config: DashboardConfig) -> Self {
        let data_path = config.resolve_data_path();
        tracing::info!(
            data_path = %data_path.display(),
            locale = %config.locale,
            "初始化AppState"
        );

        if !i18n::is_supported(&config.locale) {
            tracing::warn!(locale = %config.locale, "语言未打包，文本将回退到默认语言");
        }

        let options = SnapshotOptions {
            locale: config.locale.clone(),
            rating_range: config.rating_range,
            placeholder_rows: config.placeholder_rows,
        };
        let snapshot = Arc::new(SalesSnapshot::load(&data_path, &options));
        Self::with_snapshot(config, snapshot)
    }

    /// 使用已构建的快照创建（测试 / 嵌入场景）
    pub fn with_snapshot(config: DashboardConfig, snapshot: Arc<SalesSnapshot>) -> Self {
        let catalog = Arc::new(PageCatalog::load_or_default(config.catalog_path.as_deref()));

        let dashboard_api = Arc::new(DashboardApi::new(
            snapshot.clone(),
            catalog.clone(),
            RenderSettings {
                locale: config.locale.clone(),
                preview_rows: config.preview_rows,
                histogram_bins: config.histogram_bins,
            },
        ));

        tracing::info!(
            records = snapshot.len(),
            degraded = snapshot.is_degraded(),
            pages = catalog.pages.len(),
            questions = catalog.question_count(),
            "AppState初始化成功"
        );

        Self {
            config,
            snapshot,
            catalog,
            dashboard_api,
        }
    }
}
