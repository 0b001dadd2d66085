// Metric names the collectors emit. The backend routes on these strings,
// so they are fixed vocabulary rather than free-form.

// insights.container/pods
pub const POD_READY_PERCENTAGE: &str = "podReadyPercentage";
pub const RESTARTING_CONTAINER_COUNT: &str = "restartingContainerCount";
pub const OOM_KILLED_CONTAINER_COUNT: &str = "oomKilledContainerCount";
pub const COMPLETED_JOB_COUNT: &str = "completedJobsCount";

// insights.container/containers
pub const CPU_EXCEEDED_PERCENTAGE: &str = "cpuExceededPercentage";
pub const MEMORY_RSS_EXCEEDED_PERCENTAGE: &str = "memoryRssExceededPercentage";
pub const CPU_THRESHOLD_VIOLATED: &str = "cpuThresholdViolated";
pub const MEMORY_RSS_THRESHOLD_VIOLATED: &str = "memoryRssThresholdViolated";

// insights.container/persistentvolumes
pub const PV_USAGE_EXCEEDED_PERCENTAGE: &str = "pvUsageExceededPercentage";
pub const PV_USAGE_THRESHOLD_VIOLATED: &str = "pvUsageThresholdViolated";

// Insights.Container/nodes
pub const CPU_USAGE_MILLICORES: &str = "cpuUsageMillicores";
pub const CPU_USAGE_PERCENTAGE: &str = "cpuUsagePercentage";
pub const MEMORY_RSS_BYTES: &str = "memoryRssBytes";
pub const MEMORY_RSS_PERCENTAGE: &str = "memoryRssPercentage";
pub const DISK_USED_PERCENTAGE: &str = "diskUsedPercentage";
