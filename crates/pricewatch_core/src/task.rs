//! Breadcrumb to background-task resolution.
//!
//! Every dashboard page belongs to exactly one nightly builder task. The page is
//! identified by its breadcrumb trail, so the mapping is a priority-ordered table of
//! substring conditions evaluated by [`resolve_task`].

/// Identifies the background builder task that produces a page's data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskDescriptor {
    pub task_name: String,
    pub task_key: String,
}

impl TaskDescriptor {
    pub fn new(task_name: impl Into<String>, task_key: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            task_key: task_key.into(),
        }
    }
}

/// Static form of [`TaskDescriptor`] used by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: &'static str,
    pub key: &'static str,
}

impl TaskSpec {
    pub fn to_descriptor(self) -> TaskDescriptor {
        TaskDescriptor::new(self.name, self.key)
    }
}

pub const RICE: TaskSpec = TaskSpec {
    name: "DailyRiceBuilder",
    key: "daily-rice-builder-3d",
};
pub const CROP: TaskSpec = TaskSpec {
    name: "DailyCropBuilder",
    key: "daily-crop-builder-3d",
};
pub const FRUIT: TaskSpec = TaskSpec {
    name: "DailyFruitBuilder",
    key: "daily-fruit-builder-3d",
};
pub const FLOWER: TaskSpec = TaskSpec {
    name: "DailyFlowerBuilder",
    key: "daily-flower-builder-3d",
};
pub const HOG: TaskSpec = TaskSpec {
    name: "DailyHogBuilder",
    key: "daily-hog-builder-3d",
};
pub const RAM: TaskSpec = TaskSpec {
    name: "DailyRamBuilder",
    key: "daily-ram-builder-3d",
};
pub const CHICKEN: TaskSpec = TaskSpec {
    name: "DailyChickenBuilder",
    key: "daily-chicken-builder-3d",
};
pub const DUCK: TaskSpec = TaskSpec {
    name: "DailyDuckBuilder",
    key: "daily-duck-builder-3d",
};
pub const GOOSE: TaskSpec = TaskSpec {
    name: "DailyGooseBuilder",
    key: "daily-goose-builder-3d",
};
pub const CATTLE: TaskSpec = TaskSpec {
    name: "DailyCattleBuilder",
    key: "daily-cattle-builder-3d",
};
pub const ORIGIN_SEAFOOD: TaskSpec = TaskSpec {
    name: "DailyOriginSeafoodBuilder",
    key: "daily-seafood-origin-builder-3d",
};
pub const WHOLESALE_SEAFOOD: TaskSpec = TaskSpec {
    name: "DailyWholesaleSeafoodBuilder",
    key: "daily-seafood-wholesale-builder-3d",
};
pub const FEED: TaskSpec = TaskSpec {
    name: "DailyFeedBuilder",
    key: "daily-feed-builder-31d",
};
pub const NAIF_CHICKENS: TaskSpec = TaskSpec {
    name: "DailyNaifchickensBuilder",
    key: "daily-naifchickens-builder-31d",
};

/// One breadcrumb condition: the label at `level` must contain `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crumb {
    pub level: usize,
    pub text: &'static str,
}

const fn crumb(level: usize, text: &'static str) -> Crumb {
    Crumb { level, text }
}

/// A row of the lookup table. All conditions must hold for the rule to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRule {
    pub conditions: &'static [Crumb],
    pub task: TaskSpec,
}

impl TaskRule {
    pub fn matches<S: AsRef<str>>(&self, breadcrumb: &[S]) -> bool {
        self.conditions.iter().all(|condition| {
            breadcrumb
                .get(condition.level)
                .is_some_and(|label| label.as_ref().trim().contains(condition.text))
        })
    }
}

const AGRI: Crumb = crumb(0, "農產品");
const LIVESTOCK: Crumb = crumb(0, "畜禽產品");
const TOTALS: Crumb = crumb(0, "合計項目");
const ALL_ITEMS: Crumb = crumb(1, "全品項查詢");
const ALL_SEAFOOD: Crumb = crumb(2, "漁產品");

/// Lookup table in priority order; the first matching rule wins.
///
/// Level 0 holds the product category on category pages. The "all items" query
/// pages carry their category one level deeper.
#[rustfmt::skip]
pub const TASK_RULES: &[TaskRule] = &[
    TaskRule { conditions: &[AGRI, crumb(1, "糧價")], task: RICE },
    TaskRule { conditions: &[AGRI, crumb(1, "蔬菜")], task: CROP },
    TaskRule { conditions: &[AGRI, crumb(1, "水果")], task: FRUIT },
    TaskRule { conditions: &[AGRI, crumb(1, "花卉")], task: FLOWER },
    TaskRule { conditions: &[LIVESTOCK, crumb(1, "毛豬")], task: HOG },
    TaskRule { conditions: &[LIVESTOCK, crumb(1, "羊")], task: RAM },
    TaskRule { conditions: &[LIVESTOCK, crumb(1, "雞")], task: CHICKEN },
    TaskRule { conditions: &[LIVESTOCK, crumb(1, "鴨")], task: DUCK },
    TaskRule { conditions: &[LIVESTOCK, crumb(1, "牛")], task: CATTLE },
    TaskRule { conditions: &[crumb(0, "漁產品")], task: ORIGIN_SEAFOOD },
    TaskRule { conditions: &[TOTALS, crumb(1, "蔬菜-批發合計")], task: CROP },
    TaskRule { conditions: &[TOTALS, crumb(1, "水果-批發合計")], task: FRUIT },
    TaskRule { conditions: &[TOTALS, crumb(1, "花卉-批發合計")], task: FLOWER },
    TaskRule { conditions: &[TOTALS, crumb(1, "毛豬合計")], task: HOG },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "糧價")], task: RICE },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "蔬菜")], task: CROP },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "水果")], task: FRUIT },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "花卉")], task: FLOWER },
    TaskRule { conditions: &[ALL_ITEMS, ALL_SEAFOOD, crumb(3, "產地")], task: ORIGIN_SEAFOOD },
    TaskRule { conditions: &[ALL_ITEMS, ALL_SEAFOOD, crumb(3, "批發")], task: WHOLESALE_SEAFOOD },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "毛豬")], task: HOG },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "羊")], task: RAM },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "雞")], task: CHICKEN },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "鴨")], task: DUCK },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "鵝")], task: GOOSE },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "牛")], task: CATTLE },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "飼料")], task: FEED },
    TaskRule { conditions: &[ALL_ITEMS, crumb(2, "畜產會")], task: NAIF_CHICKENS },
];

/// Resolve the task for a breadcrumb trail against [`TASK_RULES`].
///
/// Returns `None` when no rule matches; such pages have nothing to poll.
pub fn resolve_task<S: AsRef<str>>(breadcrumb: &[S]) -> Option<TaskDescriptor> {
    resolve_with(TASK_RULES, breadcrumb)
}

/// Resolve against an arbitrary rule table.
pub fn resolve_with<S: AsRef<str>>(rules: &[TaskRule], breadcrumb: &[S]) -> Option<TaskDescriptor> {
    rules
        .iter()
        .find(|rule| rule.matches(breadcrumb))
        .map(|rule| rule.task.to_descriptor())
}
