//! 终端页面 - 视图/会话层
//!
//! 每个 page_* 方法对应原平台的一个页面：渲染表单、把输入绑定到
//! 表单模型、按服务端响应决定跳转。任何请求失败只提示一次，
//! 不自动重试，用户可手动重新提交。

use anyhow::Result;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;
use tracing::{error, info};

use crate::clients::{build_http_client, QuizClient, TestClient, UserClient};
use crate::config::Config;
use crate::models::loaders::load_quiz_draft;
use crate::models::quiz::{QuizDraft, QuizField, QuizRecord, OPTIONS_PER_QUESTION};
use crate::models::take::UserAnswer;
use crate::utils::validate_register_form;
use crate::workflow::{CreateQuizFlow, SessionCtx};

/// 应用主结构
pub struct App {
    config: Config,
    user_client: UserClient,
    quiz_client: QuizClient,
    test_client: TestClient,
}

impl App {
    /// 初始化应用：构建共享 HTTP 客户端和三个服务客户端
    pub async fn initialize(config: Config) -> Result<Self> {
        let http = build_http_client(&config)?;

        Ok(Self {
            user_client: UserClient::new(http.clone(), &config),
            quiz_client: QuizClient::new(http.clone(), &config),
            test_client: TestClient::new(http, &config),
            config,
        })
    }

    /// 运行应用主循环：入口页 → 登录 → 主页
    pub async fn run(&self) -> Result<()> {
        info!(
            "🚀 测验平台客户端启动 - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        loop {
            println!("\n==== 测验平台 ====");
            println!("[1] 注册  [2] 登录  [0] 退出");

            match read_line("> ")?.as_str() {
                "1" => {
                    if let Err(e) = self.page_register().await {
                        error!("注册失败: {}", e);
                        println!("⚠️ 注册失败，请稍后重试");
                    }
                }
                "2" => match self.page_login().await {
                    Some(ctx) => self.page_home(&ctx).await?,
                    None => println!("⚠️ 登录失败"),
                },
                "0" => return Ok(()),
                _ => println!("无效选择"),
            }
        }
    }

    /// 登录后的主页
    async fn page_home(&self, ctx: &SessionCtx) -> Result<()> {
        loop {
            println!("\n==== 主页（部门: {}）====", ctx.department);
            println!("[1] 测验列表  [2] 管理页  [3] 登出");

            match read_line("> ")?.as_str() {
                "1" => self.page_quizzes(ctx).await?,
                "2" => self.page_admin(ctx).await?,
                "3" => {
                    if let Err(e) = self.user_client.logout().await {
                        error!("登出失败: {}", e);
                    }
                    println!("已登出");
                    return Ok(());
                }
                _ => println!("无效选择"),
            }
        }
    }

    // ========== 注册/登录页 ==========

    /// 注册页：先加载部门列表供选择
    async fn page_register(&self) -> Result<()> {
        println!("\n==== 注册 ====");

        let departments = match self.quiz_client.list_departments().await {
            Ok(list) => list,
            Err(e) => {
                error!("加载部门列表失败: {}", e);
                println!("⚠️ 无法加载部门列表，请稍后重试");
                return Ok(());
            }
        };

        for dept in &departments {
            println!("  {} ({} 个测验)", dept.department_name, dept.quiz_count);
        }

        let name = read_line("用户名: ")?;
        let email = read_line("邮箱: ")?;
        let password = read_line("密码（至少 8 位）: ")?;
        let department = read_line("部门: ")?;

        if let Err(e) = validate_register_form(&email, &password) {
            println!("⚠️ {}", e);
            return Ok(());
        }

        self.user_client
            .register(&name, &email, &password, &department)
            .await?;

        println!("✅ 注册成功，请登录");
        Ok(())
    }

    /// 登录页：登录成功后通过 check-session 取回 userID
    async fn page_login(&self) -> Option<SessionCtx> {
        println!("\n==== 登录 ====");

        let email = read_line("邮箱: ").ok()?;
        let password = read_line("密码: ").ok()?;

        let department = match self.user_client.login(&email, &password).await {
            Ok(department) => department,
            Err(e) => {
                error!("登录失败: {}", e);
                return None;
            }
        };

        match self.user_client.check_session().await {
            Ok(user_id) => Some(SessionCtx::new(user_id, department)),
            Err(e) => {
                error!("会话检查失败: {}", e);
                None
            }
        }
    }

    // ========== 测验列表/答题页 ==========

    /// 测验列表页：本部门的测验加上用户成绩
    async fn page_quizzes(&self, ctx: &SessionCtx) -> Result<()> {
        loop {
            let quizzes = match self
                .quiz_client
                .list_department_quizzes(&ctx.department)
                .await
            {
                Ok(list) => list,
                Err(e) => {
                    error!("加载测验列表失败: {}", e);
                    println!("⚠️ 无法加载测验列表");
                    return Ok(());
                }
            };

            // 成绩加载失败不阻塞列表展示
            let scores = self
                .test_client
                .fetch_scores(ctx.user_id)
                .await
                .unwrap_or_else(|e| {
                    error!("加载成绩失败: {}", e);
                    Vec::new()
                });

            println!("\n==== {} 部门的测验 ====", ctx.department);
            if quizzes.is_empty() {
                println!("该部门暂无测验");
                return Ok(());
            }

            for (i, quiz) in quizzes.iter().enumerate() {
                let done = scores.iter().any(|s| s.quiz_id == quiz.id);
                let marker = if done { "已完成" } else { "未作答" };
                println!("[{}] {} - {} ({})", i + 1, quiz.title, quiz.description, marker);
            }
            println!("[0] 返回");

            let Some(index) = read_index("选择测验: ", quizzes.len())? else {
                return Ok(());
            };
            let quiz = &quizzes[index];

            if scores.iter().any(|s| s.quiz_id == quiz.id) {
                self.page_view_score(ctx, quiz.id).await;
            } else {
                self.page_take_quiz(ctx, quiz.id).await;
            }
        }
    }

    /// 查询单个测验的得分（每次重新拉取成绩）
    async fn page_view_score(&self, ctx: &SessionCtx, quiz_id: u64) {
        match self.test_client.fetch_scores(ctx.user_id).await {
            Ok(scores) => match scores.iter().find(|s| s.quiz_id == quiz_id) {
                Some(score) => {
                    println!("测验「{}」得分: {}", score.quiz_name, score.score)
                }
                None => println!("该测验还没有成绩"),
            },
            Err(e) => {
                error!("查询成绩失败: {}", e);
                println!("⚠️ 查询成绩失败");
            }
        }
    }

    /// 答题页：逐题作答后一次性提交
    async fn page_take_quiz(&self, ctx: &SessionCtx, quiz_id: u64) {
        let quiz = match self.test_client.start_quiz(quiz_id).await {
            Ok(quiz) => quiz,
            Err(e) => {
                error!("加载测验失败: {}", e);
                println!("⚠️ 无法加载测验");
                return;
            }
        };

        println!("\n==== {} ====", quiz.quiz);

        // 同一题重复作答时后写覆盖
        let mut answers: HashMap<u64, String> = HashMap::new();

        for (i, question) in quiz.questions.iter().enumerate() {
            if question.options.is_empty() {
                continue;
            }
            println!("\n{}. {}", i + 1, question.text);
            for (o, option) in question.options.iter().enumerate() {
                let letter = (b'a' + o as u8) as char;
                println!("  {}. {}", letter, option.text);
            }

            loop {
                let input = match read_line("你的选择: ") {
                    Ok(input) => input,
                    Err(_) => return,
                };
                let choice = input
                    .bytes()
                    .next()
                    .and_then(|b| b.checked_sub(b'a'))
                    .map(usize::from);
                match choice.and_then(|c| question.options.get(c)) {
                    Some(option) => {
                        answers.insert(question.id, option.text.clone());
                        break;
                    }
                    None => println!("请输入 a-{}", (b'a' + question.options.len() as u8 - 1) as char),
                }
            }
        }

        let formatted: Vec<UserAnswer> = answers
            .into_iter()
            .map(|(question_id, answer)| UserAnswer { question_id, answer })
            .collect();

        match self
            .test_client
            .submit_answers(quiz_id, ctx.user_id, &formatted)
            .await
        {
            Ok(()) => println!("✅ 测验提交成功!"),
            Err(e) => {
                error!("提交测验失败: {}", e);
                println!("⚠️ 提交测验失败");
            }
        }
    }

    // ========== 管理页 ==========

    /// 管理页：全部测验的列表与增删改入口
    async fn page_admin(&self, ctx: &SessionCtx) -> Result<()> {
        loop {
            let quizzes = match self.quiz_client.list_all_quizzes().await {
                Ok(list) => list,
                Err(e) => {
                    error!("加载测验列表失败: {}", e);
                    println!("⚠️ 无法加载测验列表");
                    return Ok(());
                }
            };

            println!("\n==== 管理页 ====");
            if quizzes.is_empty() {
                println!("暂无测验");
            }
            for (i, quiz) in quizzes.iter().enumerate() {
                println!(
                    "[{}] {} - {} ({})",
                    i + 1,
                    quiz.title,
                    quiz.description,
                    quiz.department
                );
            }
            println!("[c] 创建测验  [f] 从 TOML 文件创建  [u] 更新  [d] 删除  [0] 返回");

            match read_line("> ")?.as_str() {
                "c" => self.page_create_quiz(ctx).await?,
                "f" => self.page_create_quiz_from_toml(ctx).await?,
                "u" => {
                    if let Some(index) = read_index("更新哪个测验: ", quizzes.len())? {
                        self.page_update_quiz(ctx, quizzes[index].id).await?;
                    }
                }
                "d" => {
                    if let Some(index) = read_index("删除哪个测验: ", quizzes.len())? {
                        match self.quiz_client.delete_quiz(quizzes[index].id, ctx.user_id).await {
                            Ok(()) => println!("✅ 已删除"),
                            Err(e) => {
                                error!("删除测验失败: {}", e);
                                println!("⚠️ 删除测验失败");
                            }
                        }
                    }
                }
                "0" => return Ok(()),
                _ => println!("无效选择"),
            }
        }
    }

    /// 创建页：交互式填写草稿，最后交给提交流程
    async fn page_create_quiz(&self, ctx: &SessionCtx) -> Result<()> {
        println!("\n==== 创建测验 ====");

        // 草稿为本页独占，离开页面即丢弃
        let mut draft = QuizDraft::new();
        draft.set_field(QuizField::Title, read_line("标题: ")?);
        draft.set_field(QuizField::Description, read_line("描述: ")?);
        draft.set_field(QuizField::Department, read_line("部门: ")?);

        loop {
            let q_index = draft.questions.len() - 1;
            self.fill_question(&mut draft, q_index)?;

            if read_line("继续添加题目? [y/N] ")?.eq_ignore_ascii_case("y") {
                draft.add_question();
            } else {
                break;
            }
        }

        if let Err(e) = draft.validate() {
            println!("⚠️ {}", e);
            return Ok(());
        }

        self.submit_draft(ctx, &draft).await;
        Ok(())
    }

    /// 创建页变体：从 TOML 文件加载草稿
    async fn page_create_quiz_from_toml(&self, ctx: &SessionCtx) -> Result<()> {
        let path = read_line("TOML 文件路径: ")?;

        let draft = match load_quiz_draft(Path::new(&path)).await {
            Ok(draft) => draft,
            Err(e) => {
                error!("加载草稿失败: {}", e);
                println!("⚠️ 加载草稿失败");
                return Ok(());
            }
        };

        self.submit_draft(ctx, &draft).await;
        Ok(())
    }

    /// 填写单个题目：题干、四个选项、正确选项
    fn fill_question(&self, draft: &mut QuizDraft, q_index: usize) -> Result<()> {
        println!("\n-- 第 {} 题 --", q_index + 1);
        draft.set_question_text(q_index, read_line("题干: ")?);

        for o_index in 0..OPTIONS_PER_QUESTION {
            let text = read_line(&format!("选项 {}: ", o_index + 1))?;
            draft.set_option_text(q_index, o_index, text);
        }

        loop {
            if let Some(correct) = read_index("正确选项编号: ", OPTIONS_PER_QUESTION)? {
                draft.set_option_correct(q_index, correct, true);
                return Ok(());
            }
            println!("必须选择一个正确选项");
        }
    }

    /// 执行创建序列并以一条提示收场（细节在诊断日志中）
    async fn submit_draft(&self, ctx: &SessionCtx, draft: &QuizDraft) {
        let flow = CreateQuizFlow::new(&self.config);
        match flow.run(&self.quiz_client, ctx, draft).await {
            Ok(_) => println!("✅ 测验创建成功!"),
            Err(e) => {
                error!("创建测验失败: {}", e);
                println!("⚠️ 测验创建失败");
            }
        }
    }

    /// 更新页：头部和每道题目各自独立提交，没有整体提交
    async fn page_update_quiz(&self, ctx: &SessionCtx, quiz_id: u64) -> Result<()> {
        let mut record: QuizRecord = match self.quiz_client.fetch_quiz(quiz_id).await {
            Ok(record) => record,
            Err(e) => {
                error!("加载测验失败: {}", e);
                println!("⚠️ 无法加载测验");
                return Ok(());
            }
        };

        loop {
            println!("\n==== 更新测验「{}」（部门: {}，不可改）====", record.title, record.department);
            for (i, question) in record.questions.iter().enumerate() {
                println!("  {}. {}", i + 1, question.text);
                for (o, option) in question.options.iter().enumerate() {
                    let marker = if option.is_correct { "✓" } else { " " };
                    println!("     [{}] {}. {}", marker, o + 1, option.text);
                }
            }
            println!("[1] 改标题  [2] 改描述  [3] 改题干  [4] 改选项文本  [5] 勾选正确选项");
            println!("[6] 提交测验头部  [7] 提交某道题目  [0] 返回");

            match read_line("> ")?.as_str() {
                "1" => record.set_field(QuizField::Title, read_line("新标题: ")?),
                "2" => record.set_field(QuizField::Description, read_line("新描述: ")?),
                "3" => {
                    if let Some(q) = read_index("题号: ", record.questions.len())? {
                        record.set_question_text(q, read_line("新题干: ")?);
                    }
                }
                "4" => {
                    if let Some((q, o)) = self.pick_option(&record)? {
                        record.set_option_text(q, o, read_line("新选项文本: ")?);
                    }
                }
                "5" => {
                    if let Some((q, o)) = self.pick_option(&record)? {
                        record.set_option_correct(q, o, true);
                    }
                }
                "6" => {
                    match self
                        .quiz_client
                        .update_quiz(record.id, ctx.user_id, &record.title, &record.description)
                        .await
                    {
                        Ok(()) => println!("✅ 测验更新成功!"),
                        Err(e) => {
                            error!("更新测验失败: {}", e);
                            println!("⚠️ 测验更新失败");
                        }
                    }
                }
                "7" => {
                    if let Some(q) = read_index("题号: ", record.questions.len())? {
                        let question = &record.questions[q];
                        match self
                            .quiz_client
                            .update_question(record.id, question.id, ctx.user_id, &question.to_payload())
                            .await
                        {
                            Ok(()) => println!("✅ 题目更新成功!"),
                            Err(e) => {
                                error!("更新题目失败: {}", e);
                                println!("⚠️ 题目更新失败");
                            }
                        }
                    }
                }
                "0" => return Ok(()),
                _ => println!("无效选择"),
            }
        }
    }

    /// 选择一道题目下的一个选项
    fn pick_option(&self, record: &QuizRecord) -> Result<Option<(usize, usize)>> {
        let Some(q) = read_index("题号: ", record.questions.len())? else {
            return Ok(None);
        };
        let Some(o) = read_index("选项编号: ", record.questions[q].options.len())? else {
            return Ok(None);
        };
        Ok(Some((q, o)))
    }
}

// ========== 输入辅助函数 ==========

/// 读取一行输入并去掉首尾空白
fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_string())
}

/// 读取 1 起始的序号，0 或非法输入返回 None
fn read_index(prompt: &str, len: usize) -> Result<Option<usize>> {
    let input = read_line(prompt)?;
    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Ok(Some(n - 1)),
        _ => Ok(None),
    }
}
