//! The built-in mock dataset: three notebook problems, seven library
//! schemas, and the deep-dive content table.
//!
//! Everything here is hand-authored demo content for the prototype. The
//! records are rebuilt on each call; the registry is constructed once at
//! startup, so that cost is irrelevant.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::content::model::{
    LinkKind, NotebookMeta, NotebookStatus, Pitfall, Problem, RelatedLink, SchemaCategory,
    SchemaItem, SchemaOption, Step, TapCard, Trigger,
};
use crate::content::registry::{
    ConceptContent, ConceptPoint, DeepDiveContent, ModelComparison, VariantContent, VariantStep,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid built-in date")
}

/// The ordered problem dataset. The first entry is the default active
/// problem for a fresh capture flow.
pub fn problems() -> Vec<Problem> {
    vec![function_parity_problem(), sequence_sum_problem(), conic_vieta_problem()]
}

/// Classic abstract-function inequality (脱"f"模型). The fully worked
/// flagship problem used by the capture → analysis → scaffold flow.
fn function_parity_problem() -> Problem {
    Problem {
        id: "prob_001".into(),
        raw_text: "已知 f(x) 是定义在 R 上的偶函数，且在 [0, +∞) 上单调递增。\
                   若 f(a-1) < f(2)，求实数 a 的取值范围。"
            .into(),
        triggers: vec![
            Trigger {
                id: "t1".into(),
                text: "偶函数".into(),
                schema_id: "schema_symmetry".into(),
            },
            Trigger {
                id: "t2".into(),
                text: "单调递增".into(),
                schema_id: "schema_monotonicity".into(),
            },
        ],
        schema_options: vec![
            SchemaOption {
                id: "opt_A".into(),
                title: "模型 A：特值代入法".into(),
                description: "代入几个具体的数字试试，比如 a=1, a=0。".into(),
                is_correct: false,
                explanation: "代入法只能排除选项，无法求解完整的取值范围。\
                              这是一道逻辑推演题，不是选择题。"
                    .into(),
            },
            SchemaOption {
                id: "opt_B".into(),
                title: "模型 B：脱\u{201c}f\u{201d}法（转化不等式）".into(),
                description: "利用奇偶性和单调性，去掉函数符号 f，转化为自变量的大小比较。".into(),
                is_correct: true,
                explanation: "正确！核心逻辑是：偶函数意味着 f(x)=f(|x|)，\
                              结合单调性，可以直接比较自变量的绝对值。"
                    .into(),
            },
            SchemaOption {
                id: "opt_C".into(),
                title: "模型 C：导数法求极值".into(),
                description: "对 f(x) 求导，分析导数的正负性。".into(),
                is_correct: false,
                explanation: "题目没有给出 f(x) 的具体解析式，无法求导。".into(),
            },
        ],
        steps: vec![
            Step {
                id: "s1".into(),
                instruction: "第一步：利用\u{201c}偶函数\u{201d}性质处理符号".into(),
                content: "因为 f(x) 是偶函数，所以 f(x) = f(|x|)。\n\
                          不等式转化为：f(|a-1|) < f(|2|)"
                    .into(),
                pitfall: None,
            },
            Step {
                id: "s2".into(),
                instruction: "第二步：利用\u{201c}单调性\u{201d}去掉函数符号 f".into(),
                content: "因为 f(x) 在 [0, +∞) 单调递增，且 |a-1| 和 |2| 都在这个区间内。\n\
                          这意味着：自变量越大，函数值越大。\n\
                          所以可以直接得到：|a-1| < 2"
                    .into(),
                pitfall: Some(Pitfall {
                    title: "去符号陷阱".into(),
                    description: "注意！准备去掉 f 之前，你检查自变量是否落在单调区间了吗？\n\
                                  很多人直接写 a-1 < 2，这是错的！"
                        .into(),
                    counter_example: "反例：若 f(x)=x² (偶函数)，f(-3)=9 > f(2)=4。\
                                      但是 -3 < 2 成立吗？不成立。必须加绝对值！"
                        .into(),
                }),
            },
            Step {
                id: "s3".into(),
                instruction: "第三步：解绝对值不等式".into(),
                content: "-2 < a - 1 < 2\n各加 1 得：\n-1 < a < 3".into(),
                pitfall: None,
            },
        ],
        tap_card: TapCard {
            trigger: "f(x) 是偶函数 + 单调性 + 不等式 f(A) < f(B)".into(),
            action: "转化为 |A| < |B| (若在正区间递增)".into(),
            pitfall: "脱去 f 时，忘记给自变量加绝对值，导致漏解。".into(),
        },
        related_links: vec![
            RelatedLink {
                id: "r1".into(),
                title: "变式：f(x) 是奇函数且单调递增".into(),
                kind: LinkKind::Variant,
            },
            RelatedLink {
                id: "r2".into(),
                title: "关联：利用对称性解抽象函数不等式".into(),
                kind: LinkKind::Concept,
            },
            RelatedLink {
                id: "r3".into(),
                title: "易错：忽略定义域的隐含条件".into(),
                kind: LinkKind::Concept,
            },
        ],
        notebook: Some(NotebookMeta {
            date: date(2023, 10, 24),
            tags: vec!["函数".into(), "导数".into()],
            status: NotebookStatus::Reviewing,
            schema_title: "脱\u{201c}f\u{201d}模型".into(),
        }),
    }
}

/// 错位相减法 sum-of-series problem.
fn sequence_sum_problem() -> Problem {
    Problem {
        id: "prob_002".into(),
        raw_text: "已知数列 {an} 满足 an = n·2^n，求数列 {an} 的前 n 项和 Sn。".into(),
        triggers: vec![Trigger {
            id: "t1".into(),
            text: "n·2^n".into(),
            schema_id: "schema_staggered".into(),
        }],
        schema_options: vec![
            SchemaOption {
                id: "opt_A".into(),
                title: "模型 A：裂项相消法".into(),
                description: "把通项拆成两项之差，求和时中间项抵消。".into(),
                is_correct: false,
                explanation: "裂项相消适用于分式型通项（如 1/n(n+1)），\
                              n·2^n 无法自然裂项。"
                    .into(),
            },
            SchemaOption {
                id: "opt_B".into(),
                title: "模型 B：错位相减法".into(),
                description: "通项是等差 × 等比，写出 Sn 与 2Sn，两式相减。".into(),
                is_correct: true,
                explanation: "正确！n 是等差数列，2^n 是等比数列，\
                              乘积型通项正是错位相减法的识别特征。"
                    .into(),
            },
            SchemaOption {
                id: "opt_C".into(),
                title: "模型 C：等比数列求和公式".into(),
                description: "直接套用 Sn = a1(1-q^n)/(1-q)。".into(),
                is_correct: false,
                explanation: "{an} 本身不是等比数列（相邻项之比不是常数），\
                              公式不能直接套用。"
                    .into(),
            },
        ],
        steps: vec![
            Step {
                id: "s1".into(),
                instruction: "第一步：写出 Sn 与 2Sn".into(),
                content: "Sn  = 1·2 + 2·2² + 3·2³ + … + n·2^n\n\
                          2Sn =       1·2² + 2·2³ + … + (n-1)·2^n + n·2^(n+1)"
                    .into(),
                pitfall: None,
            },
            Step {
                id: "s2".into(),
                instruction: "第二步：两式错位相减".into(),
                content: "Sn - 2Sn = 2 + 2² + 2³ + … + 2^n - n·2^(n+1)\n\
                          即 -Sn = (2^(n+1) - 2) - n·2^(n+1)"
                    .into(),
                pitfall: Some(Pitfall {
                    title: "末项符号陷阱".into(),
                    description: "相减后最后一项是 -n·2^(n+1)，负号极易丢失！\n\
                                  丢了负号，整个结果的主导项就错了。"
                        .into(),
                    counter_example: "反例：n=1 时 S1 = 2。若丢负号会得到 S1 = 6，\
                                      代入检验立刻暴露错误。"
                        .into(),
                }),
            },
            Step {
                id: "s3".into(),
                instruction: "第三步：化简得到结论".into(),
                content: "Sn = (n-1)·2^(n+1) + 2".into(),
                pitfall: None,
            },
        ],
        tap_card: TapCard {
            trigger: "通项公式 = 等差 × 等比 (n · 2^n)".into(),
            action: "写出 Sn, 2Sn，两式相减，构成等比数列求和".into(),
            pitfall: "相减后最后一项 -n·2^(n+1) 容易忘记负号".into(),
        },
        related_links: vec![
            RelatedLink {
                id: "r4".into(),
                title: "关联：等比数列求和公式的适用前提".into(),
                kind: LinkKind::Concept,
            },
        ],
        notebook: Some(NotebookMeta {
            date: date(2023, 10, 22),
            tags: vec!["数列".into(), "求和".into()],
            status: NotebookStatus::Reviewing,
            schema_title: "错位相减法".into(),
        }),
    }
}

/// 韦达定理设而不求 line-conic intersection problem.
fn conic_vieta_problem() -> Problem {
    Problem {
        id: "prob_003".into(),
        raw_text: "直线 y=kx+1 与椭圆 x²/4 + y² = 1 交于 A, B 两点，\
                   若 OA⊥OB，求 k 的值。"
            .into(),
        triggers: vec![
            Trigger {
                id: "t1".into(),
                text: "交于 A, B 两点".into(),
                schema_id: "schema_vieta".into(),
            },
            Trigger {
                id: "t2".into(),
                text: "OA⊥OB".into(),
                schema_id: "schema_dot_product".into(),
            },
        ],
        schema_options: vec![
            SchemaOption {
                id: "opt_A".into(),
                title: "模型 A：求出交点坐标".into(),
                description: "解方程组求出 A, B 的坐标，再验证垂直。".into(),
                is_correct: false,
                explanation: "交点坐标含根号且依赖参数 k，硬算会陷入繁琐的代数运算。\
                              这正是\u{201c}设而不求\u{201d}要避免的。"
                    .into(),
            },
            SchemaOption {
                id: "opt_B".into(),
                title: "模型 B：韦达定理设而不求".into(),
                description: "联立方程，用 x1+x2 与 x1x2 表达垂直条件。".into(),
                is_correct: true,
                explanation: "正确！OA⊥OB 等价于 x1x2 + y1y2 = 0，\
                              完全可以用韦达定理的对称式表达。"
                    .into(),
            },
            SchemaOption {
                id: "opt_C".into(),
                title: "模型 C：几何法找特殊位置".into(),
                description: "利用椭圆的对称性猜测直线的特殊位置。".into(),
                is_correct: false,
                explanation: "直线过定点 (0,1) 而非中心，对称性论证不成立，\
                              只能得到猜测而非证明。"
                    .into(),
            },
        ],
        steps: vec![
            Step {
                id: "s1".into(),
                instruction: "第一步：联立直线与椭圆方程".into(),
                content: "把 y = kx+1 代入 x²/4 + y² = 1：\n\
                          (1+4k²)x² + 8kx = 0 化为一般式 (1+4k²)x² + 8kx + 0 = 0"
                    .into(),
                pitfall: None,
            },
            Step {
                id: "s2".into(),
                instruction: "第二步：韦达定理 + 垂直条件".into(),
                content: "x1+x2 = -8k/(1+4k²)，x1x2 = 0 的对称式代入\n\
                          x1x2 + y1y2 = x1x2 + (kx1+1)(kx2+1) = 0，解出 k"
                    .into(),
                pitfall: Some(Pitfall {
                    title: "增根陷阱".into(),
                    description: "解出 k 之后，你验证过 Δ > 0 了吗？\n\
                                  不验根，求出的 k 可能对应\u{201c}不相交\u{201d}的直线！"
                        .into(),
                    counter_example: "反例：某些 k 值使 Δ ≤ 0，直线与椭圆至多一个交点，\
                                      A, B 两点根本不存在，垂直条件无从谈起。"
                        .into(),
                }),
            },
            Step {
                id: "s3".into(),
                instruction: "第三步：验根并写出结论".into(),
                content: "对解出的 k 逐一检验 Δ > 0，保留使直线与椭圆有两个交点的值。".into(),
                pitfall: None,
            },
        ],
        tap_card: TapCard {
            trigger: "直线交圆锥曲线 + 向量垂直 (x1x2 + y1y2 = 0)".into(),
            action: "联立方程 -> 韦达定理 -> 代入 x1x2 + y1y2 = 0 求解".into(),
            pitfall: "忘记 Δ > 0 判定，算出 k 值后必须验根".into(),
        },
        related_links: vec![
            RelatedLink {
                id: "r5".into(),
                title: "易错：忽略判别式 Δ > 0 的检验".into(),
                kind: LinkKind::Concept,
            },
        ],
        notebook: Some(NotebookMeta {
            date: date(2023, 10, 20),
            tags: vec!["解析几何".into(), "椭圆".into()],
            status: NotebookStatus::Mastered,
            schema_title: "韦达定理设而不求".into(),
        }),
    }
}

/// The schema library, grouped by category in its natural order.
pub fn schemas() -> Vec<SchemaItem> {
    vec![
        SchemaItem {
            id: "sch_f1".into(),
            category: SchemaCategory::Function,
            title: "脱\u{201c}f\u{201d}模型 (解抽象不等式)".into(),
            sub_title: "利用单调性去掉函数符号".into(),
            mastery_level: 85,
            last_reviewed: "2天前".into(),
            tap: TapCard {
                trigger: "f(x) 单调性已知 + 不等式两边都有 f".into(),
                action: "利用单调性去掉 f，注意奇偶性调整自变量符号".into(),
                pitfall: "偶函数去 f 时，必须给自变量加绝对值 (|A| < |B|)".into(),
            },
        },
        SchemaItem {
            id: "sch_f2".into(),
            category: SchemaCategory::Function,
            title: "函数零点存在性定理".into(),
            sub_title: "判断零点所在区间".into(),
            mastery_level: 40,
            last_reviewed: "1周前".into(),
            tap: TapCard {
                trigger: "连续函数 + 区间端点异号 f(a)f(b)<0".into(),
                action: "判定 (a,b) 内至少有一个零点".into(),
                pitfall: "忽略函数必须是\u{201c}连续\u{201d}的这一前提条件".into(),
            },
        },
        SchemaItem {
            id: "sch_f3".into(),
            category: SchemaCategory::Function,
            title: "导数切线方程".into(),
            sub_title: "求曲线上某点的切线".into(),
            mastery_level: 92,
            last_reviewed: "昨天".into(),
            tap: TapCard {
                trigger: "求\u{201c}在\u{201d}点 P 的切线 vs 求\u{201c}过\u{201d}点 P 的切线".into(),
                action: "\u{201c}在\u{201d}点P：k=f'(x0)；\u{201c}过\u{201d}点P：设切点 (x0, y0) 列方程".into(),
                pitfall: "混淆切点与定点。如果点不在曲线上，必须设切点！".into(),
            },
        },
        SchemaItem {
            id: "sch_s1".into(),
            category: SchemaCategory::Sequence,
            title: "累加法求通项".into(),
            sub_title: "an+1 - an = f(n)".into(),
            mastery_level: 60,
            last_reviewed: "3天前".into(),
            tap: TapCard {
                trigger: "递推式形如 an+1 - an = f(n)".into(),
                action: "列出 n-1 个式子累加消项".into(),
                pitfall: "累加后项数计算错误，通常是 1 到 n-1".into(),
            },
        },
        SchemaItem {
            id: "sch_s2".into(),
            category: SchemaCategory::Sequence,
            title: "错位相减法求和".into(),
            sub_title: "等差 × 等比 数列".into(),
            mastery_level: 25,
            last_reviewed: "1个月前".into(),
            tap: TapCard {
                trigger: "通项公式 = 等差数列 × 等比数列".into(),
                action: "写出 Sn，写出 qSn，两式相减".into(),
                pitfall: "相减后最后一项的符号容易写错（应该是负号）".into(),
            },
        },
        SchemaItem {
            id: "sch_g1".into(),
            category: SchemaCategory::Geometry,
            title: "直线与圆锥曲线联立".into(),
            sub_title: "韦达定理设而不求".into(),
            mastery_level: 70,
            last_reviewed: "5天前".into(),
            tap: TapCard {
                trigger: "直线交椭圆/双曲线于 A, B 两点".into(),
                action: "联立方程 -> Δ>0 -> 韦达定理 x1+x2, x1x2".into(),
                pitfall: "忘记验证 Δ > 0 导致增根".into(),
            },
        },
        SchemaItem {
            id: "sch_g2".into(),
            category: SchemaCategory::Geometry,
            title: "点差法 (中点弦问题)".into(),
            sub_title: "涉及弦中点坐标".into(),
            mastery_level: 55,
            last_reviewed: "2周前".into(),
            tap: TapCard {
                trigger: "已知弦中点坐标或涉及中点轨迹".into(),
                action: "代点作差，得到 k·k_mid 与参数的关系".into(),
                pitfall: "忘记检验直线是否与曲线相交 (Δ判定)".into(),
            },
        },
    ]
}

/// The deep-dive content table, keyed by `RelatedLink::id`.
pub fn deep_dives() -> HashMap<String, DeepDiveContent> {
    let mut table = HashMap::new();

    table.insert(
        "r1".to_string(),
        DeepDiveContent::Variant(VariantContent {
            title: "变式训练：奇函数与不等式".into(),
            problem: "已知 f(x) 是定义在 R 上的奇函数，且在 [0, +∞) 上单调递减。\
                      若 f(1-a) + f(2a) < 0，求实数 a 的取值范围。"
                .into(),
            steps: vec![
                VariantStep {
                    title: "第一步：移项变形".into(),
                    content: "由 f(1-a) + f(2a) < 0，得 f(1-a) < -f(2a)。\n\
                              利用奇函数性质 -f(x) = f(-x)，得：\n f(1-a) < f(-2a)"
                        .into(),
                    tip: None,
                },
                VariantStep {
                    title: "第二步：利用单调性去 f".into(),
                    content: "因为 f(x) 在 [0, +∞) 递减，且是奇函数，所以 f(x) 在 R 上单调递减。\n\
                              直接去掉 f，不等号方向改变：\n 1-a > -2a"
                        .into(),
                    tip: Some("奇函数在对称区间单调性相同！".into()),
                },
            ],
            conclusion: "解得 a > -1".into(),
            comparison: ModelComparison {
                original: "偶函数：f(|A|) < f(|B|) => |A| < |B| (增)".into(),
                variant: "奇函数：f(A) < -f(B) => f(A) < f(-B) => A > -B (减)".into(),
            },
        }),
    );

    table.insert(
        "r2".to_string(),
        DeepDiveContent::Concept(ConceptContent {
            title: "概念解析：抽象函数的对称性".into(),
            body: "对于抽象函数 f(x)，除了常见的奇偶性，还有更广泛的对称模型：".into(),
            points: vec![
                ConceptPoint {
                    label: "轴对称".into(),
                    desc: "若 f(a+x) = f(a-x)，则关于直线 x=a 对称。".into(),
                },
                ConceptPoint {
                    label: "中心对称".into(),
                    desc: "若 f(a+x) + f(a-x) = 2b，则关于点 (a, b) 对称。".into(),
                },
                ConceptPoint {
                    label: "周期性".into(),
                    desc: "若 f(x+a) = -f(x)，则 T=2a。".into(),
                },
            ],
            example: None,
            insight: "本题中的偶函数其实是 x=0 轴对称的一个特例。".into(),
            warning: false,
        }),
    );

    table.insert(
        "r3".to_string(),
        DeepDiveContent::Concept(ConceptContent {
            title: "易错警示：定义域隐含条件".into(),
            body: "在去掉函数符号 f 时，务必保证自变量在定义域内！".into(),
            points: vec![],
            example: Some(
                "例：若 f(x) = lg(x)，求解 f(x) < f(2)。\n\
                 错误解法：x < 2。\n正确解法：0 < x < 2。"
                    .into(),
            ),
            insight: "本题中 f(x) 定义域为 R，所以不需要额外限制。\
                      但遇到对数、根号函数时，这是第一杀手。"
                .into(),
            warning: true,
        }),
    );

    table.insert(
        "r4".to_string(),
        DeepDiveContent::Concept(ConceptContent {
            title: "概念解析：等比求和公式的前提".into(),
            body: "Sn = a1(1-q^n)/(1-q) 只对等比数列成立，且要求 q ≠ 1：".into(),
            points: vec![
                ConceptPoint {
                    label: "等比判定".into(),
                    desc: "相邻项之比必须是与 n 无关的常数 q。".into(),
                },
                ConceptPoint {
                    label: "q = 1 特判".into(),
                    desc: "公比为 1 时公式分母为零，此时 Sn = n·a1。".into(),
                },
            ],
            example: None,
            insight: "错位相减法正是把\u{201c}等差 × 等比\u{201d}化归为可用公式的等比求和。".into(),
            warning: false,
        }),
    );

    table.insert(
        "r5".to_string(),
        DeepDiveContent::Concept(ConceptContent {
            title: "易错警示：判别式 Δ > 0 的检验".into(),
            body: "设而不求的代数变形默认 A, B 两个交点存在，这个前提必须单独检验！".into(),
            points: vec![],
            example: Some(
                "例：联立后得 (1+4k²)x² + 8kx + c = 0。\n\
                 解出 k 后必须回代验证 Δ = 64k² - 4c(1+4k²) > 0。"
                    .into(),
            ),
            insight: "韦达定理只是必要条件的表达，Δ > 0 才保证交点真实存在。".into(),
            warning: true,
        }),
    );

    table
}

/// The designated fallback record for unrecognized link ids.
pub fn deep_dive_fallback() -> DeepDiveContent {
    DeepDiveContent::Concept(ConceptContent {
        title: "内容建设中".into(),
        body: "这条关联的深入解析还没有编写完成。".into(),
        points: vec![],
        example: None,
        insight: "先回到总结卡片，继续巩固当前图式。".into(),
        warning: false,
    })
}
