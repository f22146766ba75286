use chrono::NaiveDate;

pub fn render_daily_log(client: &str, today: NaiveDate) -> String {
    DAILY_LOG_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{CLIENT}}", &escape_html(client))
        .replace("{{TODAY}}", &today.to_string())
}

pub fn render_meal_plan(client: &str) -> String {
    MEAL_PLAN_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{CLIENT}}", &escape_html(client))
}

pub fn render_missing_client() -> String {
    MISSING_CLIENT_HTML.replace("{{STYLE}}", STYLE)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const STYLE: &str = r#"
    :root {
      --bg: #f7f7f5;
      --ink: #1d1d1b;
      --muted: #6b6a66;
      --accent: #111111;
      --done: #2e9d5b;
      --card: #ffffff;
      --line: rgba(0, 0, 0, 0.08);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    main { max-width: 1100px; margin: 0 auto; padding: 20px 16px 64px; }
    header { display: flex; justify-content: space-between; align-items: center; gap: 12px; }
    h1 { margin: 0; font-size: 1.8rem; }
    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); gap: 18px; margin-top: 18px; }
    .card { background: var(--card); border: 1px solid var(--line); border-radius: 14px; padding: 18px; display: grid; gap: 12px; }
    .card h2 { margin: 0; font-size: 1.1rem; }
    label { font-weight: 500; display: grid; gap: 6px; }
    input, select, textarea { font: inherit; padding: 8px 10px; border: 1px solid var(--line); border-radius: 8px; width: 100%; }
    textarea { min-height: 64px; resize: vertical; }
    button { font: inherit; border: 1px solid var(--line); background: white; border-radius: 8px; padding: 8px 10px; cursor: pointer; }
    button.active { background: var(--accent); color: white; }
    button.primary { background: var(--accent); color: white; width: 100%; padding: 14px; font-weight: 600; }
    .row { display: flex; gap: 4px; }
    .row button { flex: 1; }
    .strip { display: flex; justify-content: center; align-items: center; gap: 6px; margin-top: 16px; }
    .day { width: 56px; height: 56px; border-radius: 50%; display: grid; place-items: center; font-size: 0.8rem; }
    .day.completed { background: var(--done); color: white; }
    .day.today { border: 2px solid #d33; }
    .day.selected { background: var(--accent); color: white; }
    .status { min-height: 1.4em; text-align: center; color: var(--done); font-weight: 500; margin: 12px 0; }
    .summary { margin-top: 16px; }
    .summary[hidden] { display: none; }
    .error { min-height: 100vh; display: grid; place-items: center; text-align: center; color: #c0392b; font-size: 1.1rem; }
"#;

const MISSING_CLIENT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Log</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <p class="error">Client ID Missing<br />Please contact your coach to get the correct link.</p>
</body>
</html>
"#;

const DAILY_LOG_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Tracking</title>
  <style>{{STYLE}}</style>
</head>
<body data-client="{{CLIENT}}" data-today="{{TODAY}}">
  <main>
    <header>
      <h1>Daily Tracking</h1>
      <button type="button" id="to-plan">Go to Meal Plan</button>
    </header>

    <nav class="strip">
      <button type="button" id="prev-week">&lsaquo;</button>
      <div class="strip" id="days"></div>
      <button type="button" id="next-week">&rsaquo;</button>
    </nav>

    <section class="grid">
      <div class="card">
        <h2>Basic Metrics</h2>
        <label>Training Type
          <select name="trainingType">
            <option value="">Select training type</option>
            <option value="rest">Rest</option>
            <option value="weight">Weight Training</option>
            <option value="cardio">Cardio</option>
            <option value="hiit">HIIT</option>
            <option value="bodyweight">Bodyweight Training</option>
          </select>
        </label>
        <label>Weight (kg) <input type="number" name="weight" /></label>
        <label>Steps <input type="number" name="steps" /></label>
        <label>Water Intake (L) <input type="number" name="waterIntake" /></label>
        <div>Bathroom #2
          <div class="row" id="bathroom"></div>
        </div>
        <label>Supplements <textarea name="supplements"></textarea></label>
        <button type="button" id="paste-supplements">Paste from meal plan</button>
      </div>

      <div class="card" id="meals">
        <h2>Meals</h2>
      </div>

      <div class="card" id="biofeedback">
        <h2>Biofeedback</h2>
        <p>1 is bad &ndash; 5 is good</p>
      </div>
    </section>

    <section class="card" style="margin-top: 18px;">
      <h2>Notes</h2>
      <textarea name="notes"></textarea>
    </section>

    <div class="status" id="status"></div>
    <button type="button" class="primary" id="save">Save Daily Log</button>

    <section class="card summary" id="summary" hidden></section>
  </main>

  <script>
    const client = document.body.dataset.client;
    const query = `?client=${encodeURIComponent(client)}`;
    const statusEl = document.getElementById('status');
    const summaryEl = document.getElementById('summary');
    const fields = ['trainingType', 'weight', 'steps', 'waterIntake', 'supplements', 'notes'];
    const ratings = ['sleep', 'energy', 'stress', 'hunger', 'digestion', 'bloating'];

    let selected = document.body.dataset.today;
    let record = null;

    const shiftDate = (iso, days) => {
      const date = new Date(`${iso}T00:00:00Z`);
      date.setUTCDate(date.getUTCDate() + days);
      return date.toISOString().slice(0, 10);
    };

    const api = async (path, options = {}) => {
      const res = await fetch(`/api${path}${query}`, {
        headers: { 'content-type': 'application/json' },
        ...options
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const setStatus = (message) => {
      statusEl.textContent = message;
    };

    const buttonRow = (values, current, onPick) => {
      const row = document.createElement('div');
      row.className = 'row';
      values.forEach((value) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.textContent = value.label ?? value;
        const raw = value.value ?? value;
        button.classList.toggle('active', raw === current);
        button.addEventListener('click', () => onPick(raw));
        row.appendChild(button);
      });
      return row;
    };

    const render = () => {
      fields.forEach((name) => {
        document.querySelector(`[name="${name}"]`).value = record[name];
      });

      const bathroom = document.getElementById('bathroom');
      bathroom.replaceChildren(buttonRow(['0', '1', '2', '3+'], record.bathroom, (value) => {
        record.bathroom = value;
        save();
      }));

      const meals = document.getElementById('meals');
      meals.querySelectorAll('.meal').forEach((el) => el.remove());
      record.meals.forEach((meal, index) => {
        const wrapper = document.createElement('div');
        wrapper.className = 'meal';
        const label = document.createElement('label');
        label.textContent = `Meal ${index + 1}`;
        const text = document.createElement('textarea');
        text.value = meal;
        text.addEventListener('change', () => {
          record.meals[index] = text.value;
          save();
        });
        label.appendChild(text);
        const options = [1, 2, 3, 4].map((n) => ({ label: `Option ${n}`, value: n }));
        wrapper.append(label, buttonRow(options, record.mealOptions[index], (option) => {
          api(`/days/${selected}/meals/${index + 1}/options/${option}`, { method: 'POST' })
            .then((day) => { record = day.record; render(); })
            .catch((err) => setStatus(err.message));
        }));
        meals.appendChild(wrapper);
      });

      const bio = document.getElementById('biofeedback');
      bio.querySelectorAll('.rating').forEach((el) => el.remove());
      ratings.forEach((key) => {
        const wrapper = document.createElement('div');
        wrapper.className = 'rating';
        wrapper.textContent = key.charAt(0).toUpperCase() + key.slice(1);
        wrapper.appendChild(buttonRow([1, 2, 3, 4, 5], record.biofeedback[key], (value) => {
          record.biofeedback[key] = value;
          save();
        }));
        bio.appendChild(wrapper);
      });
    };

    const renderWeek = async () => {
      const week = await api(`/weeks/${selected}`);
      const days = document.getElementById('days');
      days.replaceChildren(...week.days.map((day) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.className = 'day';
        button.classList.toggle('completed', day.completed);
        button.classList.toggle('today', day.isToday);
        button.classList.toggle('selected', day.date === selected);
        button.innerHTML = `<span>${day.weekday}</span><strong>${Number(day.date.slice(8))}</strong>`;
        button.addEventListener('click', () => load(day.date));
        return button;
      }));
    };

    const save = async () => {
      try {
        const day = await api(`/days/${selected}`, { method: 'PUT', body: JSON.stringify(record) });
        record = day.record;
        render();
      } catch (err) {
        setStatus(err.message);
      }
    };

    const load = async (date) => {
      selected = date;
      summaryEl.hidden = true;
      const day = await api(`/days/${date}`);
      record = day.record;
      render();
      await renderWeek();
    };

    const renderSummary = (summary) => {
      const sessions = Object.entries(summary.trainingSessions)
        .filter(([, count]) => count > 0)
        .map(([kind, count]) => `<p>${kind}: <strong>${count}</strong></p>`)
        .join('');
      summaryEl.innerHTML = `
        <h2>Weekly Summary</h2>
        <p>Days Logged: <strong>${summary.daysLogged} of 7</strong></p>
        ${summary.stepsAverage > 0 ? `<p>Steps Average: <strong>${summary.stepsAverage.toLocaleString()}</strong></p>` : ''}
        ${sessions}
        <p>Meals Logged: <strong>${summary.totalMealsLogged}</strong></p>
        <p>Keep the consistency going!</p>
      `;
      summaryEl.hidden = false;
    };

    fields.forEach((name) => {
      document.querySelector(`[name="${name}"]`).addEventListener('change', (event) => {
        record[name] = event.target.value;
        save();
      });
    });

    document.getElementById('paste-supplements').addEventListener('click', () => {
      api(`/days/${selected}/supplements/paste`, { method: 'POST' })
        .then((day) => { record = day.record; render(); })
        .catch((err) => setStatus(err.message));
    });

    document.getElementById('save').addEventListener('click', async () => {
      try {
        const result = await api(`/days/${selected}/commit`, {
          method: 'POST',
          body: JSON.stringify(record)
        });
        setStatus(result.message);
        setTimeout(() => setStatus(''), 3000);
        if (result.weeklySummary) {
          renderSummary(result.weeklySummary);
        }
        await renderWeek();
      } catch (err) {
        setStatus(err.message);
      }
    });

    document.getElementById('prev-week').addEventListener('click', () => load(shiftDate(selected, -7)));
    document.getElementById('next-week').addEventListener('click', () => load(shiftDate(selected, 7)));
    document.getElementById('to-plan').addEventListener('click', () => {
      window.location.href = `/meal-plan${query}`;
    });

    load(selected).catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;

const MEAL_PLAN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Your Meal Plan</title>
  <style>{{STYLE}}</style>
</head>
<body data-client="{{CLIENT}}">
  <main>
    <header>
      <button type="button" id="to-log">Go to Daily Tracking</button>
      <h1>Your Meal Plan</h1>
    </header>

    <section class="grid" id="meals"></section>

    <section class="card" style="margin-top: 18px;">
      <h2>Supplements</h2>
      <textarea id="supplements" placeholder="Enter supplements..."></textarea>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const client = document.body.dataset.client;
    const query = `?client=${encodeURIComponent(client)}`;
    const statusEl = document.getElementById('status');
    let plan = null;

    const save = async () => {
      const res = await fetch(`/api/meal-plan${query}`, {
        method: 'PUT',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(plan)
      });
      statusEl.textContent = res.ok ? '' : (await res.text());
    };

    const render = () => {
      const meals = document.getElementById('meals');
      meals.replaceChildren(...plan.meals.map((options, mealIndex) => {
        const card = document.createElement('div');
        card.className = 'card';
        const title = document.createElement('h2');
        title.textContent = `Meal ${mealIndex + 1}`;
        card.appendChild(title);
        options.forEach((option, optionIndex) => {
          const label = document.createElement('label');
          label.textContent = `Option ${optionIndex + 1}`;
          const text = document.createElement('textarea');
          text.placeholder = 'Enter meal details...';
          text.value = option;
          text.addEventListener('change', () => {
            plan.meals[mealIndex][optionIndex] = text.value;
            save();
          });
          label.appendChild(text);
          card.appendChild(label);
        });
        return card;
      }));
      document.getElementById('supplements').value = plan.supplements;
    };

    document.getElementById('supplements').addEventListener('change', (event) => {
      plan.supplements = event.target.value;
      save();
    });

    document.getElementById('to-log').addEventListener('click', () => {
      window.location.href = `/${query}`;
    });

    fetch(`/api/meal-plan${query}`)
      .then((res) => res.json())
      .then((data) => { plan = data; render(); })
      .catch((err) => { statusEl.textContent = err.message; });
  </script>
</body>
</html>
"#;
